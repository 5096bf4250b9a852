//! End-to-end composition driver: sanitize → wrap → budget → paginate →
//! compose, with optional batch SVG output.

use crate::color::ColorError;
use crate::config::{LineStyle, OverflowPolicy, PageStyle, Settings};
use crate::generator::StrokeGenerator;
use crate::output::{write_svg_pages, BatchError};
use crate::page::{PageComposer, VectorDocument};
use crate::wrap::{
    check_line_budget, paginate, truncate_to_budget, wrap_text, Overflow, WrapError,
};
use core::fmt;
use std::path::{Path, PathBuf};

/// Composition failure or decision point surfaced to the caller.
#[derive(Debug)]
pub enum EngineError {
    /// Invalid wrap parameters; rejected before processing.
    Wrap(WrapError),
    /// Content exceeds the total-line budget under the `Abort` policy.
    Overflow(Overflow),
    /// A configured color could not be resolved.
    Color(ColorError),
    /// Batch output failed; carries the pages already written.
    Batch(BatchError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wrap(err) => write!(f, "wrap rejected: {}", err),
            Self::Overflow(overflow) => write!(f, "overflow: {}", overflow),
            Self::Color(err) => write!(f, "color rejected: {}", err),
            Self::Batch(err) => write!(f, "output failed: {}", err),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wrap(err) => Some(err),
            Self::Overflow(_) => None,
            Self::Color(err) => Some(err),
            Self::Batch(err) => Some(err),
        }
    }
}

impl From<WrapError> for EngineError {
    fn from(value: WrapError) -> Self {
        Self::Wrap(value)
    }
}

impl From<ColorError> for EngineError {
    fn from(value: ColorError) -> Self {
        Self::Color(value)
    }
}

impl From<BatchError> for EngineError {
    fn from(value: BatchError) -> Self {
        Self::Batch(value)
    }
}

/// Drives one generation request from raw text to finished documents.
///
/// Style snapshots are taken once at construction; the engine holds no
/// other state and may be reused across requests with the same settings.
pub struct ComposeEngine {
    settings: Settings,
    page_style: PageStyle,
    line_style: LineStyle,
}

impl ComposeEngine {
    pub fn new(settings: Settings) -> Result<Self, EngineError> {
        let page_style = PageStyle::from_settings(&settings)?;
        let line_style = LineStyle::from_settings(&settings)?;
        Ok(Self {
            settings,
            page_style,
            line_style,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn page_style(&self) -> &PageStyle {
        &self.page_style
    }

    /// Replace characters the generator cannot synthesize with spaces,
    /// preserving line structure.
    pub fn sanitize<G>(&self, generator: &G, text: &str) -> String
    where
        G: StrokeGenerator + ?Sized,
    {
        text.chars()
            .map(|c| {
                if c == '\n' || generator.supports_char(c) {
                    c
                } else {
                    ' '
                }
            })
            .collect()
    }

    /// Sanitize, wrap, and budget-check input text into display lines.
    ///
    /// Under [`OverflowPolicy::Abort`] an over-budget text surfaces as
    /// [`EngineError::Overflow`] with the true counts; under `Truncate` the
    /// first `total_lines` lines are kept.
    pub fn plan<G>(&self, generator: &G, text: &str) -> Result<Vec<String>, EngineError>
    where
        G: StrokeGenerator + ?Sized,
    {
        let sanitized = self.sanitize(generator, text);
        let mut lines = wrap_text(
            &sanitized,
            self.settings.max_line_length,
            self.settings.wrap_mode,
        )?;
        if let Err(overflow) = check_line_budget(&lines, self.settings.total_lines) {
            match self.settings.overflow_policy {
                OverflowPolicy::Abort => return Err(EngineError::Overflow(overflow)),
                OverflowPolicy::Truncate => {
                    log::warn!("truncating: {}", overflow);
                    truncate_to_budget(&mut lines, self.settings.total_lines);
                }
            }
        }
        Ok(lines)
    }

    /// Compose one finalized vector document per page.
    pub fn compose_pages<G>(
        &self,
        generator: &mut G,
        text: &str,
    ) -> Result<Vec<VectorDocument>, EngineError>
    where
        G: StrokeGenerator + ?Sized,
    {
        let lines = self.plan(generator, text)?;
        let pages = paginate(lines, self.settings.lines_per_page)?;
        let mut docs = Vec::with_capacity(pages.len());
        for (index, page) in pages.iter().enumerate() {
            docs.push(PageComposer::compose_page(
                generator,
                page,
                self.page_style,
                &self.line_style,
                index + 1,
            ));
        }
        Ok(docs)
    }

    /// Compose and write one SVG file per page into `dir`.
    pub fn write_pages<G>(
        &self,
        generator: &mut G,
        text: &str,
        dir: &Path,
    ) -> Result<Vec<PathBuf>, EngineError>
    where
        G: StrokeGenerator + ?Sized,
    {
        let docs = self.compose_pages(generator, text)?;
        Ok(write_svg_pages(dir, &docs)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{ComposeEngine, EngineError};
    use crate::config::{OverflowPolicy, Settings};
    use crate::generator::{GenerationError, StrokeGenerator};
    use crate::stroke::GlyphSample;
    use crate::wrap::WrapMode;

    struct AsciiGenerator;

    impl StrokeGenerator for AsciiGenerator {
        fn style_count(&self) -> u32 {
            12
        }

        fn supports_char(&self, c: char) -> bool {
            c.is_ascii_alphanumeric() || c == ' '
        }

        fn generate(
            &mut self,
            text: &str,
            _style_id: u32,
            _bias: f32,
        ) -> Result<Vec<GlyphSample>, GenerationError> {
            Ok(text
                .chars()
                .map(|_| GlyphSample {
                    dx: 1.0,
                    dy: 0.5,
                    lift: true,
                })
                .collect())
        }
    }

    fn engine(settings: Settings) -> ComposeEngine {
        ComposeEngine::new(settings).unwrap()
    }

    #[test]
    fn sanitize_replaces_unsupported_characters() {
        let engine = engine(Settings::default());
        assert_eq!(
            engine.sanitize(&AsciiGenerator, "ab!c\nd£e"),
            "ab c\nd e"
        );
    }

    #[test]
    fn abort_policy_surfaces_overflow_counts() {
        let settings = Settings {
            max_line_length: 4,
            total_lines: 2,
            overflow_policy: OverflowPolicy::Abort,
            wrap_mode: WrapMode::HardSplit,
            ..Settings::default()
        };
        let err = engine(settings)
            .plan(&AsciiGenerator, "abcdabcdabcd")
            .unwrap_err();
        match err {
            EngineError::Overflow(overflow) => {
                assert_eq!(overflow.required, 3);
                assert_eq!(overflow.available, 2);
            }
            other => panic!("expected overflow, got {:?}", other),
        }
    }

    #[test]
    fn truncate_policy_keeps_exactly_the_budget() {
        let settings = Settings {
            max_line_length: 4,
            total_lines: 2,
            overflow_policy: OverflowPolicy::Truncate,
            wrap_mode: WrapMode::HardSplit,
            ..Settings::default()
        };
        let lines = engine(settings)
            .plan(&AsciiGenerator, "abcdabcdabcd")
            .unwrap();
        assert_eq!(lines, vec!["abcd", "abcd"]);
    }

    #[test]
    fn thirty_lines_make_two_pages() {
        let settings = Settings {
            max_line_length: 3,
            total_lines: 30,
            lines_per_page: 24,
            wrap_mode: WrapMode::HardSplit,
            ..Settings::default()
        };
        // 30 source lines, each short enough to stay a single display line
        let text = (0..30).map(|i| format!("l{}", i)).collect::<Vec<_>>().join("\n");
        let docs = engine(settings)
            .compose_pages(&mut AsciiGenerator, &text)
            .unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].stroke_path_count(), 24);
        assert_eq!(docs[1].stroke_path_count(), 6);
        assert_eq!(docs[0].page_number(), 1);
        assert_eq!(docs[1].page_number(), 2);
    }
}
