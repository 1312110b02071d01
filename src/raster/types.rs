//! Raster frame types shared by the source, resize and ascii stages.

use crate::error::{ReelError, Result};

/// Pixel layout of a raster frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// RGB format (3 bytes per pixel)
    Rgb,
    /// RGBA format (4 bytes per pixel)
    Rgba,
    /// Single-channel luminance (1 byte per pixel)
    Luma,
}

impl PixelFormat {
    /// Number of bytes per pixel.
    pub fn channels(&self) -> usize {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
            PixelFormat::Luma => 1,
        }
    }
}

/// A single RGB pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Pixel {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// One decoded frame of the source animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterFrame {
    /// Raw pixel data, row-major, origin top-left
    pub data: Vec<u8>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Pixel format
    pub format: PixelFormat,
}

impl RasterFrame {
    /// Create an RGB frame from raw bytes.
    pub fn rgb(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
            format: PixelFormat::Rgb,
        }
    }

    /// Build an RGB frame from a row-major list of pixels.
    pub fn from_pixels(pixels: &[Pixel], width: u32, height: u32) -> Self {
        let data = pixels.iter().flat_map(|p| [p.r, p.g, p.b]).collect();
        Self::rgb(data, width, height)
    }

    /// Get the number of bytes per pixel.
    pub fn bytes_per_pixel(&self) -> usize {
        self.format.channels()
    }

    /// Number of pixels described by the dimensions.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check that the frame is 3-channel RGB with a buffer matching its
    /// dimensions. `index` is the frame's position in source order and is
    /// only used for error reporting.
    pub fn ensure_rgb(&self, index: usize) -> Result<()> {
        if self.format != PixelFormat::Rgb {
            return Err(ReelError::UnsupportedFormat {
                frame: index,
                format: self.format,
            });
        }
        let expected = self.pixel_count() * 3;
        if self.data.len() != expected {
            return Err(ReelError::FrameSizeMismatch {
                frame: index,
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    /// Pixel at (x, y). Caller guarantees an RGB frame and in-range coordinates.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Pixel {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        Pixel::new(self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }

    /// Iterate over rows of RGB pixels, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        let stride = (self.width as usize * 3).max(1);
        self.data.chunks_exact(stride).take(self.height as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_format_channels() {
        assert_eq!(PixelFormat::Rgb.channels(), 3);
        assert_eq!(PixelFormat::Rgba.channels(), 4);
        assert_eq!(PixelFormat::Luma.channels(), 1);
    }

    #[test]
    fn test_from_pixels_layout() {
        let frame = RasterFrame::from_pixels(
            &[Pixel::new(1, 2, 3), Pixel::new(4, 5, 6)],
            2,
            1,
        );
        assert_eq!(frame.data, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(frame.pixel(1, 0), Pixel::new(4, 5, 6));
        assert_eq!(frame.bytes_per_pixel(), 3);
    }

    #[test]
    fn test_ensure_rgb_rejects_rgba() {
        let frame = RasterFrame {
            data: vec![0; 8],
            width: 2,
            height: 1,
            format: PixelFormat::Rgba,
        };
        let err = frame.ensure_rgb(3).unwrap_err();
        assert!(matches!(
            err,
            ReelError::UnsupportedFormat {
                frame: 3,
                format: PixelFormat::Rgba
            }
        ));
    }

    #[test]
    fn test_ensure_rgb_rejects_short_buffer() {
        let frame = RasterFrame::rgb(vec![0; 5], 2, 1);
        assert!(matches!(
            frame.ensure_rgb(0),
            Err(ReelError::FrameSizeMismatch {
                expected: 6,
                actual: 5,
                ..
            })
        ));
    }

    #[test]
    fn test_rows_follow_top_left_origin() {
        let frame = RasterFrame::rgb(vec![1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4], 2, 2);
        let rows: Vec<&[u8]> = frame.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], &[1, 1, 1, 2, 2, 2]);
        assert_eq!(rows[1], &[3, 3, 3, 4, 4, 4]);
        assert_eq!(frame.pixel(0, 1), Pixel::new(3, 3, 3));
    }
}
