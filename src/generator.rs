//! External stroke-generator interface.

use crate::stroke::GlyphSample;
use core::fmt;

/// Handwriting synthesis model boundary.
///
/// Implementations are opaque: given one line of text, a style id, and a
/// bias, they return raw offset samples in model-native coordinates. An
/// empty result is valid and means "nothing to draw" for that line.
pub trait StrokeGenerator {
    /// Number of selectable synthesis styles; valid ids are
    /// `1..=style_count()`.
    fn style_count(&self) -> u32;

    /// Whether the model can synthesize this character.
    fn supports_char(&self, c: char) -> bool;

    /// Synthesize raw offset samples for one display line.
    fn generate(
        &mut self,
        text: &str,
        style_id: u32,
        bias: f32,
    ) -> Result<Vec<GlyphSample>, GenerationError>;
}

/// Stroke synthesis failed for a single line.
///
/// Recovered locally by skipping that line's stroke; never aborts a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationError {
    /// The model has no representation for this character.
    UnsupportedCharacter(char),
    /// The model itself failed.
    Model(String),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedCharacter(c) => write!(f, "unsupported character: {:?}", c),
            Self::Model(message) => write!(f, "stroke model failure: {}", message),
        }
    }
}

impl std::error::Error for GenerationError {}
