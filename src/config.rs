//! Generation settings and the immutable per-request style snapshots.

use crate::color::{Color, ColorError};
use crate::wrap::WrapMode;
use serde::{Deserialize, Serialize};

/// What to do when wrapped content exceeds the total-line budget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverflowPolicy {
    /// Surface the overflow to the caller and stop.
    #[default]
    Abort,
    /// Keep the first `total_lines` display lines and continue.
    Truncate,
}

/// Plain-scalar generation settings captured once per request.
///
/// Colors are symbolic names from the closed table or canonical `#RRGGBB`
/// values; margins are the positive page insets familiar from the control
/// surface and are negated into signed guide offsets by
/// [`PageStyle::from_settings`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub max_line_length: usize,
    pub total_lines: usize,
    pub lines_per_page: usize,
    pub wrap_mode: WrapMode,
    pub overflow_policy: OverflowPolicy,
    /// Synthesis style id, `1..=N` with N fixed by the generator.
    pub style_id: u32,
    /// Synthesis consistency bias; typical range 0.7–1.0.
    pub bias: f32,
    pub stroke_width: f32,
    pub stroke_color: String,
    pub line_height: f32,
    pub view_width: f32,
    pub view_height: f32,
    pub margin_left: f32,
    pub margin_top: f32,
    pub page_color: String,
    pub margin_color: String,
    pub rule_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        // A4-ish page: 24 lines of 32px on an 896px-tall, 0.707-aspect sheet.
        Self {
            max_line_length: 60,
            total_lines: 24,
            lines_per_page: 24,
            wrap_mode: WrapMode::default(),
            overflow_policy: OverflowPolicy::default(),
            style_id: 1,
            bias: 0.95,
            stroke_width: 1.0,
            stroke_color: "Black".to_string(),
            line_height: 32.0,
            view_width: 633.472,
            view_height: 896.0,
            margin_left: 64.0,
            margin_top: 96.0,
            page_color: "#FFFFFF".to_string(),
            margin_color: "#FF0000".to_string(),
            rule_color: "#F0F0F0".to_string(),
        }
    }
}

/// Immutable page geometry/color snapshot bound to one composer instance.
///
/// Margin offsets are signed: negative values place the corresponding
/// guide above/left of the nominal origin, which may fall outside the
/// visible background rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageStyle {
    pub line_height: f32,
    pub lines_per_page: usize,
    pub view_width: f32,
    pub view_height: f32,
    pub margin_left: f32,
    pub margin_top: f32,
    pub page_color: Color,
    pub margin_color: Color,
    pub rule_color: Color,
}

impl PageStyle {
    /// Snapshot page parameters, resolving colors and flipping the
    /// control-surface margin insets into signed guide offsets.
    pub fn from_settings(settings: &Settings) -> Result<Self, ColorError> {
        Ok(Self {
            line_height: settings.line_height,
            lines_per_page: settings.lines_per_page,
            view_width: settings.view_width,
            view_height: settings.view_height,
            margin_left: -settings.margin_left,
            margin_top: -settings.margin_top,
            page_color: Color::parse(&settings.page_color)?,
            margin_color: Color::parse(&settings.margin_color)?,
            rule_color: Color::parse(&settings.rule_color)?,
        })
    }
}

/// Per-line render style; defaulted to one uniform value across a request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub width: f32,
    pub style_id: u32,
    pub bias: f32,
}

impl LineStyle {
    pub fn from_settings(settings: &Settings) -> Result<Self, ColorError> {
        Ok(Self {
            color: Color::parse(&settings.stroke_color)?,
            width: settings.stroke_width,
            style_id: settings.style_id,
            bias: settings.bias,
        })
    }
}
