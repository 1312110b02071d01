//! Aspect-correct downsampling of raster frames to a character grid.

use super::types::RasterFrame;

/// Default terminal character aspect ratio.
/// Terminal characters are typically ~2x taller than wide.
pub const DEFAULT_CHAR_ASPECT_RATIO: f32 = 2.0;

/// Calculate output dimensions that preserve aspect ratio for terminal display.
///
/// A naive one-pixel-per-character mapping stretches the image vertically,
/// so the row count is divided by `char_aspect`. The result fits within
/// `max_char_width` x `max_char_height`.
///
/// # Arguments
/// * `img_width` - Width of the source image in pixels
/// * `img_height` - Height of the source image in pixels
/// * `max_char_width` - Maximum output width in characters
/// * `max_char_height` - Maximum output height in characters
/// * `char_aspect` - Terminal character aspect ratio (height/width)
///
/// # Returns
/// A tuple of (char_width, char_height), or (0, 0) for degenerate input.
pub fn calculate_dimensions(
    img_width: u32,
    img_height: u32,
    max_char_width: u32,
    max_char_height: u32,
    char_aspect: f32,
) -> (u32, u32) {
    if img_width == 0 || img_height == 0 || max_char_width == 0 || max_char_height == 0 {
        return (0, 0);
    }

    let img_aspect = img_width as f32 / img_height as f32;
    let target_char_aspect = img_aspect * char_aspect;

    // Try fitting to max width first
    let char_width = max_char_width;
    let char_height = (char_width as f32 / target_char_aspect).round() as u32;

    if char_height <= max_char_height && char_height > 0 {
        (char_width, char_height)
    } else {
        let char_height = max_char_height;
        let char_width = (char_height as f32 * target_char_aspect).round() as u32;
        let char_width = char_width.min(max_char_width);
        (char_width.max(1), char_height.max(1))
    }
}

/// Limits applied to every frame before smoothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeLimits {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub char_aspect: f32,
}

impl Default for ResizeLimits {
    fn default() -> Self {
        Self {
            max_width: None,
            max_height: None,
            char_aspect: DEFAULT_CHAR_ASPECT_RATIO,
        }
    }
}

impl ResizeLimits {
    /// True when neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.max_width.is_none() && self.max_height.is_none()
    }

    /// Target grid for a source of the given size, or `None` when the frame
    /// should be left untouched. Frames are never upscaled.
    pub fn target_for(&self, width: u32, height: u32) -> Option<(u32, u32)> {
        if self.is_unbounded() || width == 0 || height == 0 {
            return None;
        }
        let max_w = self.max_width.unwrap_or(u32::MAX).min(width);
        let max_h = self.max_height.unwrap_or(u32::MAX).min(height);
        let (w, h) = calculate_dimensions(width, height, max_w, max_h, self.char_aspect);
        if (w, h) == (width, height) || w == 0 || h == 0 {
            None
        } else {
            Some((w, h))
        }
    }
}

/// Box-average an RGB frame down to `char_width` x `char_height` cells.
///
/// Each cell's color is the average of all source pixels it covers. Every
/// cell covers at least one pixel.
pub fn downsample(frame: &RasterFrame, char_width: u32, char_height: u32) -> RasterFrame {
    let img_width = frame.width;
    let img_height = frame.height;

    if char_width == 0 || char_height == 0 || img_width == 0 || img_height == 0 {
        return RasterFrame::rgb(Vec::new(), 0, 0);
    }

    let mut data = Vec::with_capacity(char_width as usize * char_height as usize * 3);

    let cell_w = img_width as f32 / char_width as f32;
    let cell_h = img_height as f32 / char_height as f32;

    for cy in 0..char_height {
        let start_y = ((cy as f32 * cell_h) as u32).min(img_height - 1);
        let end_y = (((cy + 1) as f32 * cell_h) as u32).clamp(start_y + 1, img_height);
        for cx in 0..char_width {
            let start_x = ((cx as f32 * cell_w) as u32).min(img_width - 1);
            let end_x = (((cx + 1) as f32 * cell_w) as u32).clamp(start_x + 1, img_width);

            let mut sum = [0u32; 3];
            let mut count = 0u32;

            for py in start_y..end_y {
                for px in start_x..end_x {
                    let idx = ((py * img_width + px) * 3) as usize;
                    if idx + 2 < frame.data.len() {
                        sum[0] += frame.data[idx] as u32;
                        sum[1] += frame.data[idx + 1] as u32;
                        sum[2] += frame.data[idx + 2] as u32;
                        count += 1;
                    }
                }
            }

            if count > 0 {
                data.extend(sum.iter().map(|s| (s / count) as u8));
            } else {
                data.extend_from_slice(&[0, 0, 0]);
            }
        }
    }

    RasterFrame::rgb(data, char_width, char_height)
}
