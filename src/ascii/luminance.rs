//! Perceptual luminance and glyph level selection (ITU-R BT.601).

use super::glyphs::GlyphLevel;
use crate::raster::Pixel;

/// Floored luminance of a pixel: Y = 0.299*R + 0.587*G + 0.114*B.
///
/// Uses integer math with coefficients scaled by 1000 (299 + 587 + 114 = 1000),
/// which yields exactly `floor(Y)` without floating-point drift at the
/// bucket boundaries.
#[inline]
pub fn luminance(pixel: Pixel) -> u8 {
    let r = pixel.r as u32;
    let g = pixel.g as u32;
    let b = pixel.b as u32;
    ((299 * r + 587 * g + 114 * b) / 1000) as u8
}

/// Glyph level for a pixel, always in `0..16`.
#[inline]
pub fn glyph_level(pixel: Pixel) -> GlyphLevel {
    GlyphLevel::from_luminance(luminance(pixel))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_primaries() {
        assert_eq!(luminance(Pixel::new(255, 0, 0)), 76);
        assert_eq!(luminance(Pixel::new(0, 255, 0)), 149);
        assert_eq!(luminance(Pixel::new(0, 0, 255)), 29);
        assert_eq!(luminance(Pixel::new(255, 255, 255)), 255);
        assert_eq!(luminance(Pixel::new(0, 0, 0)), 0);
    }

    #[test]
    fn test_luminance_is_not_plain_average() {
        // Average would be 85 for all three
        assert!(luminance(Pixel::new(0, 255, 0)) > luminance(Pixel::new(255, 0, 0)));
        assert!(luminance(Pixel::new(255, 0, 0)) > luminance(Pixel::new(0, 0, 255)));
    }

    #[test]
    fn test_glyph_level_extremes() {
        assert_eq!(glyph_level(Pixel::new(0, 0, 0)).index(), 0);
        assert_eq!(glyph_level(Pixel::new(255, 255, 255)).index(), 15);
    }

    #[test]
    fn test_glyph_level_monotonic_over_grays() {
        let mut prev = 0;
        for v in 0..=255u8 {
            let level = glyph_level(Pixel::new(v, v, v)).index();
            assert!(level >= prev, "level dropped at gray {}", v);
            assert!(level <= 15);
            prev = level;
        }
    }
}
