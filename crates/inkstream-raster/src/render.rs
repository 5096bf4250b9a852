//! Fit-inside rasterization of finalized vector documents.

use crate::framebuffer::Framebuffer;
use core::fmt;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use inkstream::{Color, DrawCommand, PathSegment, VectorDocument};

/// Viewports with either dimension at or below this receive no preview.
/// A hidden or not-yet-laid-out display surface reports such sizes.
pub const MIN_VIEWPORT_PX: u32 = 10;

/// Uniform margin around the fitted page.
pub const PREVIEW_MARGIN_PX: u32 = 10;

/// Surround color outside the fitted page area.
const SURROUND: Rgb888 = Rgb888::new(0xE0, 0xE0, 0xE0);

/// Rasterization failed for a document-side reason.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RasterError {
    /// Document viewport is degenerate; nothing can be scaled from it.
    EmptyDocument,
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDocument => write!(f, "document has no drawable viewport"),
        }
    }
}

impl std::error::Error for RasterError {}

/// Aspect-preserving map from document space to pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewfit {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
}

impl Viewfit {
    /// Fit-inside transform: uniform scale, centered, `margin` pixels kept
    /// clear on every side.
    pub fn fit(doc_width: f32, doc_height: f32, target_w: u32, target_h: u32, margin: u32) -> Self {
        let avail_w = target_w.saturating_sub(2 * margin).max(1) as f32;
        let avail_h = target_h.saturating_sub(2 * margin).max(1) as f32;
        let scale = (avail_w / doc_width).min(avail_h / doc_height);
        Self {
            scale,
            offset_x: (target_w as f32 - doc_width * scale) / 2.0,
            offset_y: (target_h as f32 - doc_height * scale) / 2.0,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    fn map(&self, x: f32, y: f32) -> Point {
        Point::new(
            (self.offset_x + x * self.scale).round() as i32,
            (self.offset_y + y * self.scale).round() as i32,
        )
    }

    fn stroke_px(&self, width: f32) -> u32 {
        ((width * self.scale).round() as u32).max(1)
    }
}

/// Render a finalized document into a fresh framebuffer.
///
/// Returns `Ok(None)` for a degenerate viewport — a no-op, not an error;
/// the caller keeps whatever preview it already shows.
pub fn render_preview(
    doc: &VectorDocument,
    viewport_w: u32,
    viewport_h: u32,
) -> Result<Option<Framebuffer>, RasterError> {
    if viewport_w <= MIN_VIEWPORT_PX || viewport_h <= MIN_VIEWPORT_PX {
        return Ok(None);
    }
    if doc.width() <= 0.0 || doc.height() <= 0.0 {
        return Err(RasterError::EmptyDocument);
    }
    let fit = Viewfit::fit(
        doc.width(),
        doc.height(),
        viewport_w,
        viewport_h,
        PREVIEW_MARGIN_PX,
    );
    let mut frame = Framebuffer::new(viewport_w, viewport_h, SURROUND);
    match draw_document(doc, &mut frame, &fit) {
        Ok(()) => Ok(Some(frame)),
        Err(infallible) => match infallible {},
    }
}

/// Draw a document's commands, in stacking order, into any RGB target.
pub fn draw_document<D>(doc: &VectorDocument, target: &mut D, fit: &Viewfit) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    for command in doc.commands() {
        match command {
            DrawCommand::Rect(rect) => {
                let top_left = fit.map(rect.x, rect.y);
                let bottom_right = fit.map(rect.x + rect.width, rect.y + rect.height);
                let size = Size::new(
                    (bottom_right.x - top_left.x).max(0) as u32,
                    (bottom_right.y - top_left.y).max(0) as u32,
                );
                Rectangle::new(top_left, size)
                    .into_styled(PrimitiveStyle::with_fill(rgb(rect.fill)))
                    .draw(target)?;
            }
            DrawCommand::Line(line) => {
                Line::new(fit.map(line.x1, line.y1), fit.map(line.x2, line.y2))
                    .into_styled(PrimitiveStyle::with_stroke(
                        rgb(line.stroke),
                        fit.stroke_px(line.width),
                    ))
                    .draw(target)?;
            }
            DrawCommand::Path(path) => {
                let style =
                    PrimitiveStyle::with_stroke(rgb(path.stroke), fit.stroke_px(path.width));
                let mut last: Option<Point> = None;
                for segment in &path.segments {
                    match segment {
                        PathSegment::MoveTo(x, y) => last = Some(fit.map(*x, *y)),
                        PathSegment::LineTo(x, y) => {
                            let next = fit.map(*x, *y);
                            if let Some(prev) = last {
                                Line::new(prev, next).into_styled(style).draw(target)?;
                            }
                            last = Some(next);
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

fn rgb(color: Color) -> Rgb888 {
    Rgb888::new(color.r, color.g, color.b)
}

#[cfg(test)]
mod tests {
    use super::{render_preview, Viewfit, MIN_VIEWPORT_PX, PREVIEW_MARGIN_PX};
    use embedded_graphics::pixelcolor::Rgb888;
    use inkstream::{
        GenerationError, GlyphSample, LineStyle, PageComposer, PageStyle, Settings,
        StrokeGenerator,
    };

    struct StubGenerator;

    impl StrokeGenerator for StubGenerator {
        fn style_count(&self) -> u32 {
            1
        }

        fn supports_char(&self, _c: char) -> bool {
            true
        }

        fn generate(
            &mut self,
            _text: &str,
            _style_id: u32,
            _bias: f32,
        ) -> Result<Vec<GlyphSample>, GenerationError> {
            Ok(vec![
                GlyphSample {
                    dx: 5.0,
                    dy: 0.0,
                    lift: false,
                },
                GlyphSample {
                    dx: 5.0,
                    dy: 2.0,
                    lift: true,
                },
            ])
        }
    }

    fn sample_document() -> inkstream::VectorDocument {
        let settings = Settings {
            lines_per_page: 4,
            ..Settings::default()
        };
        let style = PageStyle::from_settings(&settings).unwrap();
        let line_style = LineStyle::from_settings(&settings).unwrap();
        let lines = vec!["hello".to_string()];
        PageComposer::compose_page(&mut StubGenerator, &lines, style, &line_style, 1)
    }

    #[test]
    fn degenerate_viewport_is_a_no_op() {
        let doc = sample_document();
        assert_eq!(render_preview(&doc, 0, 0), Ok(None));
        assert_eq!(render_preview(&doc, 400, MIN_VIEWPORT_PX), Ok(None));
    }

    #[test]
    fn fit_preserves_aspect_and_centers() {
        // 100x200 document into a square target: height limits the scale
        let fit = Viewfit::fit(100.0, 200.0, 400, 400, PREVIEW_MARGIN_PX);
        let expected_scale = (400.0 - 2.0 * PREVIEW_MARGIN_PX as f32) / 200.0;
        assert!((fit.scale() - expected_scale).abs() < 1e-5);
    }

    #[test]
    fn preview_paints_the_page_background() {
        let doc = sample_document();
        let frame = render_preview(&doc, 400, 600).unwrap().expect("bitmap");
        // center of the target lies inside the fitted page rectangle
        assert_eq!(frame.pixel(200, 300), Some(Rgb888::new(0xFF, 0xFF, 0xFF)));
        // the extreme corner stays surround-colored
        assert_ne!(frame.pixel(0, 0), Some(Rgb888::new(0xFF, 0xFF, 0xFF)));
    }
}
