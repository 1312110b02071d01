//! Edge-preserving bilateral smoothing applied before quantization.
//!
//! Per-pixel noise in the source turns into glyph and color jitter between
//! neighbouring characters. A bilateral filter averages each pixel with its
//! neighbours, weighting them by both distance and color similarity, so flat
//! areas are smoothed while strong edges survive.

use crate::error::Result;
use crate::raster::RasterFrame;

/// Neighbourhood diameter in pixels.
pub const DIAMETER: i32 = 9;

/// Spatial tolerance (standard deviation of the distance falloff).
pub const SIGMA_SPACE: f32 = 75.0;

/// Color-similarity tolerance (standard deviation over the summed channel difference).
pub const SIGMA_COLOR: f32 = 75.0;

/// Largest L1 distance between two RGB pixels.
const MAX_COLOR_DISTANCE: usize = 255 * 3;

/// Bilateral filter with precomputed weight tables.
///
/// Window is circular (offsets with dx² + dy² <= radius²). Borders are
/// mirrored without repeating the edge pixel.
#[derive(Debug, Clone)]
pub struct BilateralFilter {
    /// (dx, dy, spatial weight) for each offset inside the window
    kernel: Vec<(i32, i32, f32)>,
    /// Color weight indexed by L1 distance
    color_weights: Vec<f32>,
}

impl Default for BilateralFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl BilateralFilter {
    pub fn new() -> Self {
        let radius = DIAMETER / 2;
        let space_coeff = -0.5 / (SIGMA_SPACE * SIGMA_SPACE);
        let color_coeff = -0.5 / (SIGMA_COLOR * SIGMA_COLOR);

        let mut kernel = Vec::new();
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let dist2 = (dx * dx + dy * dy) as f32;
                if dist2 > (radius * radius) as f32 {
                    continue;
                }
                kernel.push((dx, dy, (dist2 * space_coeff).exp()));
            }
        }

        let color_weights = (0..=MAX_COLOR_DISTANCE)
            .map(|d| {
                let d = d as f32;
                (d * d * color_coeff).exp()
            })
            .collect();

        Self {
            kernel,
            color_weights,
        }
    }

    /// Number of offsets in the circular window.
    pub fn window_size(&self) -> usize {
        self.kernel.len()
    }

    /// Smooth an RGB frame, returning a new frame of the same size.
    ///
    /// `index` is the frame's position in source order, used for error
    /// reporting when the frame is not 3-channel RGB.
    pub fn apply(&self, frame: &RasterFrame, index: usize) -> Result<RasterFrame> {
        frame.ensure_rgb(index)?;

        let width = frame.width as usize;
        let height = frame.height as usize;
        if width == 0 || height == 0 {
            return Ok(frame.clone());
        }

        let src = &frame.data;
        let mut out = Vec::with_capacity(src.len());

        for y in 0..height {
            for x in 0..width {
                let center = (y * width + x) * 3;
                let (cr, cg, cb) = (src[center] as i32, src[center + 1] as i32, src[center + 2] as i32);

                let mut sum = [0f32; 3];
                let mut weight_sum = 0f32;

                for &(dx, dy, space_weight) in &self.kernel {
                    let nx = reflect_101(x as i64 + dx as i64, width);
                    let ny = reflect_101(y as i64 + dy as i64, height);
                    let idx = (ny * width + nx) * 3;
                    let (r, g, b) = (src[idx] as i32, src[idx + 1] as i32, src[idx + 2] as i32);

                    let diff = ((r - cr).abs() + (g - cg).abs() + (b - cb).abs()) as usize;
                    let w = space_weight * self.color_weights[diff];

                    sum[0] += r as f32 * w;
                    sum[1] += g as f32 * w;
                    sum[2] += b as f32 * w;
                    weight_sum += w;
                }

                // The center pixel always contributes weight 1, so weight_sum > 0
                for channel in sum {
                    out.push((channel / weight_sum).round().clamp(0.0, 255.0) as u8);
                }
            }
        }

        Ok(RasterFrame::rgb(out, frame.width, frame.height))
    }
}

/// Mirror an out-of-range coordinate back into `0..len` without repeating
/// the border pixel (`-1 -> 1`, `len -> len - 2`).
#[inline]
fn reflect_101(mut i: i64, len: usize) -> usize {
    let n = len as i64;
    if n == 1 {
        return 0;
    }
    loop {
        if i < 0 {
            i = -i;
        } else if i >= n {
            i = 2 * n - 2 - i;
        } else {
            return i as usize;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReelError;
    use crate::raster::PixelFormat;

    fn uniform(width: u32, height: u32, value: u8) -> RasterFrame {
        RasterFrame::rgb(vec![value; (width * height * 3) as usize], width, height)
    }

    #[test]
    fn test_window_is_circular() {
        let filter = BilateralFilter::new();
        // Offsets with dx^2 + dy^2 <= 16 inside a 9x9 square
        assert_eq!(filter.window_size(), 49);
    }

    #[test]
    fn test_reflect_101() {
        assert_eq!(reflect_101(-1, 5), 1);
        assert_eq!(reflect_101(-4, 5), 4);
        assert_eq!(reflect_101(5, 5), 3);
        assert_eq!(reflect_101(8, 5), 0);
        assert_eq!(reflect_101(-4, 2), 0);
        assert_eq!(reflect_101(3, 1), 0);
        assert_eq!(reflect_101(2, 5), 2);
    }

    #[test]
    fn test_uniform_frame_unchanged() {
        let frame = uniform(6, 4, 123);
        let out = BilateralFilter::new().apply(&frame, 0).unwrap();
        assert_eq!(out, frame);
    }

    #[test]
    fn test_preserves_dimensions() {
        let frame = RasterFrame::rgb((0..5 * 3 * 3).map(|v| v as u8).collect(), 5, 3);
        let out = BilateralFilter::new().apply(&frame, 0).unwrap();
        assert_eq!(out.width, 5);
        assert_eq!(out.height, 3);
        assert_eq!(out.data.len(), frame.data.len());
    }

    #[test]
    fn test_attenuates_small_noise() {
        let mut frame = uniform(9, 9, 100);
        let center = (4 * 9 + 4) * 3;
        frame.data[center..center + 3].copy_from_slice(&[110, 110, 110]);

        let out = BilateralFilter::new().apply(&frame, 0).unwrap();
        let smoothed = out.data[center];
        assert!(smoothed < 105, "noise not attenuated: {}", smoothed);
        assert!(smoothed >= 100);
    }

    #[test]
    fn test_preserves_strong_edge() {
        // Left half black, right half white
        let (w, h) = (8u32, 4u32);
        let mut data = Vec::new();
        for _y in 0..h {
            for x in 0..w {
                let v = if x < w / 2 { 0 } else { 255 };
                data.extend_from_slice(&[v, v, v]);
            }
        }
        let frame = RasterFrame::rgb(data, w, h);
        let out = BilateralFilter::new().apply(&frame, 0).unwrap();
        assert_eq!(out, frame);
    }

    #[test]
    fn test_rejects_non_rgb() {
        let frame = RasterFrame {
            data: vec![0; 4],
            width: 2,
            height: 2,
            format: PixelFormat::Luma,
        };
        let err = BilateralFilter::new().apply(&frame, 7).unwrap_err();
        assert!(matches!(err, ReelError::UnsupportedFormat { frame: 7, .. }));
    }

    #[test]
    fn test_empty_frame_passes_through() {
        let frame = RasterFrame::rgb(Vec::new(), 0, 0);
        let out = BilateralFilter::new().apply(&frame, 0).unwrap();
        assert_eq!(out.data.len(), 0);
    }
}
