//! Owned RGB framebuffer draw target.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::Pixel;
use std::path::Path;

/// In-memory RGB888 pixel buffer implementing
/// [`embedded_graphics::draw_target::DrawTarget`].
///
/// Out-of-bounds pixels are silently clipped, which is what lets margin
/// guides with negative offsets render partially off-page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb888>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32, fill: Rgb888) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel at (x, y), or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb888> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get((y as usize) * (self.width as usize) + (x as usize))
            .copied()
    }

    /// Copy into an `image` buffer for encoding or inspection.
    pub fn to_image(&self) -> image::RgbImage {
        let mut img = image::RgbImage::new(self.width, self.height);
        for (x, y, out) in img.enumerate_pixels_mut() {
            let color = self.pixels[(y as usize) * (self.width as usize) + (x as usize)];
            *out = image::Rgb([color.r(), color.g(), color.b()]);
        }
        img
    }

    /// Encode as PNG, for preview export.
    pub fn save_png(&self, path: &Path) -> Result<(), image::ImageError> {
        self.to_image()
            .save_with_format(path, image::ImageFormat::Png)
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u32, point.y as u32);
            if x < self.width && y < self.height {
                self.pixels[(y as usize) * (self.width as usize) + (x as usize)] = color;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Framebuffer;
    use embedded_graphics::pixelcolor::Rgb888;
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::{Line, PrimitiveStyle};

    #[test]
    fn out_of_bounds_draws_are_clipped() {
        let mut frame = Framebuffer::new(8, 8, Rgb888::new(0, 0, 0));
        Line::new(Point::new(-10, 4), Point::new(20, 4))
            .into_styled(PrimitiveStyle::with_stroke(Rgb888::new(255, 0, 0), 1))
            .draw(&mut frame)
            .unwrap();
        assert_eq!(frame.pixel(4, 4), Some(Rgb888::new(255, 0, 0)));
        assert_eq!(frame.pixel(9, 4), None);
    }

    #[test]
    fn image_copy_preserves_pixels() {
        let mut frame = Framebuffer::new(2, 2, Rgb888::new(1, 2, 3));
        frame
            .draw_iter([embedded_graphics::Pixel(
                Point::new(1, 1),
                Rgb888::new(9, 8, 7),
            )])
            .unwrap();
        let img = frame.to_image();
        assert_eq!(img.get_pixel(0, 0).0, [1, 2, 3]);
        assert_eq!(img.get_pixel(1, 1).0, [9, 8, 7]);
    }
}
