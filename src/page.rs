//! Per-page vector document assembly.
//!
//! A [`PageComposer`] walks `Empty → Assembling → Finalized` for exactly one
//! page: entering `Assembling` emits the background and the fixed guide
//! chrome, each display line then either advances the write cursor (blank
//! line) or appends one normalized stroke path, and finalizing yields an
//! immutable [`VectorDocument`].

use crate::color::Color;
use crate::config::{LineStyle, PageStyle};
use crate::generator::StrokeGenerator;
use crate::stroke::{normalize, Stroke};

/// Backend-agnostic draw command.
///
/// Document stacking order is command order: background rectangle, ruled
/// lines, margin guides, then stroke paths.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Filled rectangle.
    Rect(RectCommand),
    /// Stroked straight line.
    Line(LineCommand),
    /// Stroked open path built from move/line segments.
    Path(PathCommand),
}

/// Filled rectangle command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectCommand {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: Color,
}

/// Stroked line command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineCommand {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub stroke: Color,
    pub width: f32,
}

/// Stroked open path command.
#[derive(Clone, Debug, PartialEq)]
pub struct PathCommand {
    pub segments: Vec<PathSegment>,
    pub stroke: Color,
    pub width: f32,
}

/// One move-to or line-to path segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSegment {
    MoveTo(f32, f32),
    LineTo(f32, f32),
}

/// Finalized per-page artifact.
///
/// Coordinates share the page-style viewport origin. Immutable once built;
/// the number of stroke paths never exceeds the page's line slot count.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorDocument {
    page_number: usize,
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
    stroke_paths: usize,
}

impl VectorDocument {
    /// 1-based page index.
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Draw commands in stacking order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of stroke paths placed onto this page.
    pub fn stroke_path_count(&self) -> usize {
        self.stroke_paths
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ComposerState {
    Empty,
    Assembling,
    Finalized,
}

/// Offset between the doubled margin guide lines.
const GUIDE_GAP: f32 = 5.0;

/// Single-page composition state machine bound to one [`PageStyle`].
#[derive(Clone, Debug)]
pub struct PageComposer {
    style: PageStyle,
    page_number: usize,
    commands: Vec<DrawCommand>,
    cursor_y: f32,
    slots_used: usize,
    stroke_paths: usize,
    state: ComposerState,
}

impl PageComposer {
    /// New composer for a 1-based page number; no commands are emitted
    /// until the first line arrives or the page is finalized.
    pub fn new(style: PageStyle, page_number: usize) -> Self {
        let cursor_y = -style.margin_top + style.line_height / 2.0;
        Self {
            style,
            page_number,
            commands: Vec::new(),
            cursor_y,
            slots_used: 0,
            stroke_paths: 0,
            state: ComposerState::Empty,
        }
    }

    /// Current write cursor (anchor for the next placed stroke).
    pub fn cursor(&self) -> (f32, f32) {
        (-self.style.margin_left, self.cursor_y)
    }

    /// Background plus the fixed guide chrome, emitted exactly once.
    fn ensure_assembling(&mut self) {
        if self.state != ComposerState::Empty {
            return;
        }
        self.state = ComposerState::Assembling;
        let style = &self.style;
        self.commands.push(DrawCommand::Rect(RectCommand {
            x: 0.0,
            y: 0.0,
            width: style.view_width,
            height: style.view_height,
            fill: style.page_color,
        }));
        // Full ruled grid regardless of how many lines carry text, so the
        // page reads the same whatever the content.
        for slot in 1..=style.lines_per_page {
            let y = slot as f32 * style.line_height - style.margin_top;
            self.commands.push(DrawCommand::Line(LineCommand {
                x1: 0.0,
                y1: y,
                x2: style.view_width,
                y2: y,
                stroke: style.rule_color,
                width: 1.0,
            }));
        }
        // Doubled margin guides. Signed offsets may land outside the
        // background rectangle; that is the intended behavior.
        let guide_x = -style.margin_left + style.line_height / 2.0;
        for x in [guide_x, guide_x - GUIDE_GAP] {
            self.commands.push(DrawCommand::Line(LineCommand {
                x1: x,
                y1: 0.0,
                x2: x,
                y2: style.view_height,
                stroke: style.margin_color,
                width: 1.0,
            }));
        }
        let guide_y = -style.margin_top;
        for y in [guide_y, guide_y - GUIDE_GAP] {
            self.commands.push(DrawCommand::Line(LineCommand {
                x1: 0.0,
                y1: y,
                x2: style.view_width,
                y2: y,
                stroke: style.margin_color,
                width: 1.0,
            }));
        }
    }

    fn slots_exhausted(&self) -> bool {
        self.slots_used >= self.style.lines_per_page
    }

    fn advance_slot(&mut self) {
        self.slots_used += 1;
        self.cursor_y += self.style.line_height;
    }

    /// Advance the write cursor one line height without drawing.
    pub fn advance_blank(&mut self) {
        self.ensure_assembling();
        if self.slots_exhausted() {
            return;
        }
        self.advance_slot();
    }

    /// Generate, normalize, and place one display line.
    ///
    /// Blank lines only advance the cursor. Generator failures and empty
    /// sample sets degrade to a skipped path with the cursor still
    /// advancing. Lines beyond the page's slot count are dropped; the cap
    /// holds even if pagination upstream misbehaved.
    pub fn compose_line<G>(&mut self, generator: &mut G, line: &str, style: &LineStyle)
    where
        G: StrokeGenerator + ?Sized,
    {
        self.ensure_assembling();
        if self.slots_exhausted() {
            return;
        }
        if line.is_empty() {
            self.advance_slot();
            return;
        }
        match generator.generate(line, style.style_id, style.bias) {
            Ok(samples) => {
                let (anchor_x, anchor_y) = self.cursor();
                if let Some(stroke) = normalize(&samples, anchor_x, anchor_y) {
                    self.push_path(stroke, style);
                }
            }
            Err(err) => {
                log::warn!(
                    "stroke generation failed on page {} for {:?}: {}",
                    self.page_number,
                    line,
                    err
                );
            }
        }
        self.advance_slot();
    }

    fn push_path(&mut self, stroke: Stroke, style: &LineStyle) {
        let mut segments = Vec::with_capacity(stroke.len());
        // The pen starts lifted, so the first point always opens a segment.
        let mut pen_down = false;
        for point in stroke.points() {
            if pen_down {
                segments.push(PathSegment::LineTo(point.x, point.y));
            } else {
                segments.push(PathSegment::MoveTo(point.x, point.y));
            }
            pen_down = !point.lift;
        }
        self.commands.push(DrawCommand::Path(PathCommand {
            segments,
            stroke: style.color,
            width: style.width,
        }));
        self.stroke_paths += 1;
    }

    /// Seal the page into an immutable document.
    ///
    /// An untouched composer still yields a full page of chrome.
    pub fn finalize(mut self) -> VectorDocument {
        self.ensure_assembling();
        self.state = ComposerState::Finalized;
        VectorDocument {
            page_number: self.page_number,
            width: self.style.view_width,
            height: self.style.view_height,
            commands: self.commands,
            stroke_paths: self.stroke_paths,
        }
    }

    /// One-shot composition of a full page of display lines.
    pub fn compose_page<G>(
        generator: &mut G,
        lines: &[String],
        style: PageStyle,
        line_style: &LineStyle,
        page_number: usize,
    ) -> VectorDocument
    where
        G: StrokeGenerator + ?Sized,
    {
        let mut composer = Self::new(style, page_number);
        for line in lines {
            composer.compose_line(generator, line, line_style);
        }
        composer.finalize()
    }
}
