use std::str::FromStr;

use egui::{Color32, ColorImage, Pos2, Rect};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{Rgb, RgbImage};
use thiserror::Error;

use crate::geometry;

/// Errors that can occur while encoding the surface
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unsupported image type: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Encodings the surface can be exported to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Jpeg,
    Png,
}

impl ExportFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(mime: &str) -> Result<Self, Self::Err> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Ok(Self::Jpeg),
            "image/png" => Ok(Self::Png),
            other => Err(ExportError::UnsupportedFormat(other.to_owned())),
        }
    }
}

fn rgb(color: Color32) -> Rgb<u8> {
    Rgb([color.r(), color.g(), color.b()])
}

/// Opaque software raster the strokes are painted on.
///
/// Coverage is decided per pixel center with no anti-aliasing, so the same
/// sequence of segments always yields the same pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    image: RgbImage,
}

impl Surface {
    /// Create a surface filled with `background`. Zero dimensions are raised to 1.
    pub fn new(width: u32, height: u32, background: Color32) -> Self {
        Self {
            image: RgbImage::from_pixel(width.max(1), height.max(1), rgb(background)),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn fill(&mut self, color: Color32) {
        let color = rgb(color);
        for pixel in self.image.pixels_mut() {
            *pixel = color;
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        self.image
            .get_pixel_checked(x, y)
            .map(|Rgb([r, g, b])| Color32::from_rgb(*r, *g, *b))
    }

    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// True when every pixel has `color`
    pub fn is_filled_with(&self, color: Color32) -> bool {
        let color = rgb(color);
        self.image.pixels().all(|pixel| *pixel == color)
    }

    /// Paint a straight segment `width` wide with round caps.
    /// Pixels whose center lies within `width / 2` of the segment take `color`.
    pub fn draw_segment(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        let radius = (width / 2.0).max(0.5);
        let bounds = geometry::segment_bounds(from, to, radius);

        let max_x = self.width() as f32 - 1.0;
        let max_y = self.height() as f32 - 1.0;
        let surface_rect = Rect::from_min_max(Pos2::ZERO, Pos2::new(max_x + 1.0, max_y + 1.0));
        if !bounds.is_finite() || !bounds.intersects(surface_rect) {
            return;
        }

        let x0 = bounds.min.x.floor().clamp(0.0, max_x) as u32;
        let x1 = bounds.max.x.ceil().clamp(0.0, max_x) as u32;
        let y0 = bounds.min.y.floor().clamp(0.0, max_y) as u32;
        let y1 = bounds.max.y.ceil().clamp(0.0, max_y) as u32;

        let color = rgb(color);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                if geometry::distance_to_line_segment(center, from, to) <= radius {
                    self.image.put_pixel(x, y, color);
                }
            }
        }
    }

    /// Encode the current pixels. `quality` runs from 0.0 to 1.0 and only affects JPEG.
    pub fn encode(&self, format: ExportFormat, quality: f32) -> Result<Vec<u8>, ExportError> {
        let mut bytes = Vec::new();
        match format {
            ExportFormat::Jpeg => {
                let quality = (quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8;
                self.image
                    .write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, quality))?;
            }
            ExportFormat::Png => {
                self.image.write_with_encoder(PngEncoder::new(&mut bytes))?;
            }
        }
        Ok(bytes)
    }

    /// Copy of the pixels for uploading as an egui texture
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgb([self.width() as usize, self.height() as usize], self.image.as_raw())
    }
}
