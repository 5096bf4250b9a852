use inkstream::{GenerationError, GlyphSample, StrokeGenerator};
use std::path::PathBuf;

/// Deterministic zigzag synthesizer: every supported character becomes a
/// fixed three-sample tick with a pen lift at its end.
pub struct ZigzagGenerator {
    /// Lines containing this character fail generation.
    pub fail_on: Option<char>,
}

impl ZigzagGenerator {
    pub fn new() -> Self {
        Self { fail_on: None }
    }
}

impl StrokeGenerator for ZigzagGenerator {
    fn style_count(&self) -> u32 {
        12
    }

    fn supports_char(&self, c: char) -> bool {
        c.is_ascii_graphic() || c == ' '
    }

    fn generate(
        &mut self,
        text: &str,
        _style_id: u32,
        _bias: f32,
    ) -> Result<Vec<GlyphSample>, GenerationError> {
        if let Some(bad) = self.fail_on {
            if text.contains(bad) {
                return Err(GenerationError::UnsupportedCharacter(bad));
            }
        }
        let mut samples = Vec::with_capacity(text.chars().count() * 3);
        for _ in text.chars() {
            samples.push(GlyphSample {
                dx: 1.0,
                dy: 0.0,
                lift: false,
            });
            samples.push(GlyphSample {
                dx: 0.5,
                dy: 1.0,
                lift: false,
            });
            samples.push(GlyphSample {
                dx: 0.5,
                dy: -1.0,
                lift: true,
            });
        }
        Ok(samples)
    }
}

/// Unique scratch directory under the system temp dir.
pub fn scratch_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("inkstream_{}_{}", tag, std::process::id()))
}
