//! Unit tests for the quantization pipeline.
//!
//! These tests exercise the public ascii API:
//! - Glyph level selection
//! - Color quantization per mode
//! - Frame composition

use termreel::ascii::*;
use termreel::raster::{Pixel, RasterFrame};

fn px(r: u8, g: u8, b: u8) -> Pixel {
    Pixel::new(r, g, b)
}

// ==================== Glyph Level Tests ====================

#[test]
fn test_glyph_level_always_in_range() {
    for r in (0..=255u16).step_by(17) {
        for g in (0..=255u16).step_by(17) {
            for b in (0..=255u16).step_by(17) {
                let level = glyph_level(px(r as u8, g as u8, b as u8));
                assert!(level.index() <= 15);
            }
        }
    }
}

#[test]
fn test_glyph_level_monotonic_in_luminance() {
    // Sort a sample of pixels by luminance and check levels never decrease
    let mut samples: Vec<Pixel> = Vec::new();
    for v in (0..=255u16).step_by(5) {
        samples.push(px(v as u8, 0, 0));
        samples.push(px(0, v as u8, 0));
        samples.push(px(0, 0, v as u8));
        samples.push(px(v as u8, v as u8, 255 - v as u8));
    }
    samples.sort_by_key(|&p| luminance(p));

    let mut prev = GlyphLevel::MIN;
    for p in samples {
        let level = glyph_level(p);
        assert!(level >= prev, "{:?} dropped to {:?}", p, level);
        prev = level;
    }
}

#[test]
fn test_white_is_last_level_not_out_of_range() {
    let level = glyph_level(px(255, 255, 255));
    assert_eq!(level, GlyphLevel::MAX);
    assert_eq!(level.glyph(), '%');
}

// ==================== Color Mode Tests ====================

#[test]
fn test_grayscale_never_emits_escape() {
    let compositor = Compositor::new(ColorMode::Grayscale, ColorLayer::Foreground);
    let pixels: Vec<Pixel> = (0..64u8).map(|i| px(i * 4, 255 - i * 4, i)).collect();
    let frame = RasterFrame::from_pixels(&pixels, 8, 8);
    let out = compositor.compose(&frame, 0).unwrap();
    for row in out.rows() {
        assert!(!row.contains('\x1b'));
        assert_eq!(row.chars().count(), 8);
    }
}

#[test]
fn test_ansi16_extremes() {
    assert_eq!(ansi16_index(px(0, 0, 0)), 0);
    assert_eq!(ansi16_index(px(255, 255, 255)), 1);
}

#[test]
fn test_ansi256_pure_red_selects_cube() {
    assert_eq!(ansi256_index(px(255, 0, 0)), 196);
}

#[test]
fn test_ansi256_gray_prefers_closer_ramp() {
    // 8 is far from cube level 0 (distance 192) but ramp step 1 is exactly 11
    assert_eq!(ansi256_index(px(8, 8, 8)), 233);
    assert_eq!(ansi256_index(px(128, 128, 128)), 244);
}

#[test]
fn test_ansi256_is_deterministic() {
    for v in (0..=255u16).step_by(3) {
        let p = px(v as u8, (255 - v) as u8, (v / 2) as u8);
        assert_eq!(ansi256_index(p), ansi256_index(p));
    }
}

#[test]
fn test_truecolor_digits_match_channels() {
    for (r, g, b) in [(0, 0, 0), (1, 22, 133), (255, 128, 7)] {
        let color = ColorMode::TrueColor.quantize(px(r, g, b)).unwrap();
        assert_eq!(
            color.escape(ColorLayer::Foreground),
            format!("\x1b[38;2;{};{};{}m", r, g, b)
        );
    }
}

// ==================== Composition Tests ====================

#[test]
fn test_two_pixel_truecolor_scenario() {
    let frame = RasterFrame::from_pixels(&[px(0, 0, 0), px(255, 255, 255)], 2, 1);
    let compositor = Compositor::new(ColorMode::TrueColor, ColorLayer::Foreground);

    let glyphs = compositor.glyph_row(&frame, 0);
    assert_eq!(glyphs.len(), 2);
    assert_eq!(glyphs[0].level.index(), 0);
    assert_eq!(
        glyphs[0].color.unwrap().escape(ColorLayer::Foreground),
        "\x1b[38;2;0;0;0m"
    );
    assert_eq!(glyphs[1].level.index(), 15);
    assert_eq!(
        glyphs[1].color.unwrap().escape(ColorLayer::Foreground),
        "\x1b[38;2;255;255;255m"
    );

    let out = compositor.compose(&frame, 0).unwrap();
    assert_eq!(
        out.rows()[0],
        "\x1b[38;2;0;0;0m \x1b[0m\x1b[38;2;255;255;255m%\x1b[0m"
    );
}

#[test]
fn test_rows_are_independent_of_each_other() {
    // Every row of a colored frame ends with a reset
    let pixels: Vec<Pixel> = (0..12u8).map(|i| px(i * 20, i * 10, 200)).collect();
    let frame = RasterFrame::from_pixels(&pixels, 4, 3);
    for mode in [ColorMode::Ansi16, ColorMode::Ansi256, ColorMode::TrueColor] {
        let out = Compositor::new(mode, ColorLayer::Foreground)
            .compose(&frame, 0)
            .unwrap();
        assert_eq!(out.height(), 3);
        for row in out.rows() {
            assert!(row.starts_with("\x1b["));
            assert!(row.ends_with(RESET));
        }
    }
}

#[test]
fn test_smoothing_then_compose_keeps_grid() {
    let pixels: Vec<Pixel> = (0..30u8).map(|i| px(i * 8, i * 8, i * 8)).collect();
    let frame = RasterFrame::from_pixels(&pixels, 6, 5);
    let smoothed = BilateralFilter::new().apply(&frame, 0).unwrap();
    let out = Compositor::new(ColorMode::Grayscale, ColorLayer::Foreground)
        .compose(&smoothed, 0)
        .unwrap();
    assert_eq!(out.height(), 5);
    assert!(out.rows().iter().all(|r| r.chars().count() == 6));
}
