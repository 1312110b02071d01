//! Terminal color quantization for the four supported color modes.
//!
//! A [`ColorMode`] is chosen once per run. It maps a smoothed pixel to an
//! [`AnsiColor`] (or nothing, for grayscale), which is then written as an
//! SGR escape sequence for the selected [`ColorLayer`].

use std::fmt;
use std::str::FromStr;

use crate::error::ReelError;
use crate::raster::Pixel;

use super::luminance::luminance;

/// Escape sequence that clears all styling.
pub const RESET: &str = "\x1b[0m";

/// Luminance upper bounds (exclusive) for the 16-color palette, and the
/// palette index used below each bound. Anything brighter maps to
/// [`ANSI16_BRIGHTEST`].
const ANSI16_THRESHOLDS: [(u8, u8); 7] = [
    (32, 0),
    (64, 8),
    (96, 7),
    (128, 15),
    (160, 3),
    (192, 2),
    (224, 6),
];

const ANSI16_BRIGHTEST: u8 = 1;

/// First index of the 6x6x6 color cube in the 256-color palette.
const CUBE_BASE: u16 = 16;

/// First index of the 24-step grayscale ramp in the 256-color palette.
const GRAY_RAMP_BASE: u8 = 232;

/// Which side of the glyph a color applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorLayer {
    #[default]
    Foreground,
    Background,
}

/// Terminal color modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// No color codes; glyphs only
    Grayscale,
    /// 16-color palette bucketed by luminance
    Ansi16,
    /// 256-color palette (color cube or grayscale ramp)
    Ansi256,
    /// 24-bit direct RGB
    #[default]
    TrueColor,
}

/// A quantized terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiColor {
    /// 16-color palette index, emitted as `30+i` / `40+i`
    Basic(u8),
    /// 256-color palette index
    Indexed(u8),
    /// Direct RGB
    Rgb(Pixel),
}

impl AnsiColor {
    /// Write the SGR escape sequence selecting this color on `layer`.
    pub fn write_escape<W: fmt::Write>(&self, layer: ColorLayer, out: &mut W) -> fmt::Result {
        let bg = layer == ColorLayer::Background;
        match *self {
            AnsiColor::Basic(index) => {
                let base = if bg { 40 } else { 30 };
                write!(out, "\x1b[{}m", base + index as u16)
            }
            AnsiColor::Indexed(index) => {
                let selector = if bg { 48 } else { 38 };
                write!(out, "\x1b[{};5;{}m", selector, index)
            }
            AnsiColor::Rgb(Pixel { r, g, b }) => {
                let selector = if bg { 48 } else { 38 };
                write!(out, "\x1b[{};2;{};{};{}m", selector, r, g, b)
            }
        }
    }

    /// The escape sequence as an owned string.
    pub fn escape(&self, layer: ColorLayer) -> String {
        let mut s = String::with_capacity(20);
        // Writing to a String cannot fail
        let _ = self.write_escape(layer, &mut s);
        s
    }
}

impl ColorMode {
    /// All modes, in increasing color depth.
    pub const ALL: [ColorMode; 4] = [
        ColorMode::Grayscale,
        ColorMode::Ansi16,
        ColorMode::Ansi256,
        ColorMode::TrueColor,
    ];

    /// Map a pixel to a terminal color. Grayscale yields `None`.
    #[inline]
    pub fn quantize(&self, pixel: Pixel) -> Option<AnsiColor> {
        match self {
            ColorMode::Grayscale => None,
            ColorMode::Ansi16 => Some(AnsiColor::Basic(ansi16_index(pixel))),
            ColorMode::Ansi256 => Some(AnsiColor::Indexed(ansi256_index(pixel))),
            ColorMode::TrueColor => Some(AnsiColor::Rgb(pixel)),
        }
    }

    /// True if this mode emits escape sequences.
    pub fn is_colored(&self) -> bool {
        !matches!(self, ColorMode::Grayscale)
    }

    /// Canonical name, as accepted by the config file and CLI.
    pub fn name(&self) -> &'static str {
        match self {
            ColorMode::Grayscale => "grayscale",
            ColorMode::Ansi16 => "16-color",
            ColorMode::Ansi256 => "256-color",
            ColorMode::TrueColor => "truecolor",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorMode {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gray" | "grayscale" | "none" => Ok(ColorMode::Grayscale),
            "16color" | "16-color" | "ansi16" => Ok(ColorMode::Ansi16),
            "256color" | "256-color" | "8bit" | "ansi256" => Ok(ColorMode::Ansi256),
            "truecolor" | "24bit" | "rgb" => Ok(ColorMode::TrueColor),
            _ => Err(ReelError::UnknownColorMode {
                value: s.to_string(),
            }),
        }
    }
}

/// 16-color palette index for a pixel, bucketed by perceptual luminance.
pub fn ansi16_index(pixel: Pixel) -> u8 {
    let y = luminance(pixel);
    ANSI16_THRESHOLDS
        .iter()
        .find(|&&(bound, _)| y < bound)
        .map(|&(_, index)| index)
        .unwrap_or(ANSI16_BRIGHTEST)
}

/// 256-color palette index for a pixel.
///
/// Two candidates are compared by squared RGB distance to the pixel: the
/// nearest 6x6x6 cube entry and the nearest grayscale ramp step (from the
/// plain channel mean). The ramp only wins when strictly closer.
pub fn ansi256_index(pixel: Pixel) -> u8 {
    let r6 = to_cube_level(pixel.r);
    let g6 = to_cube_level(pixel.g);
    let b6 = to_cube_level(pixel.b);
    let cube_index = CUBE_BASE + 36 * r6 as u16 + 6 * g6 as u16 + b6 as u16;
    let cube_rgb = (
        from_cube_level(r6),
        from_cube_level(g6),
        from_cube_level(b6),
    );

    let mean = (pixel.r as f64 + pixel.g as f64 + pixel.b as f64) / 3.0;
    let gray_step = (mean / 255.0 * 23.0).round() as u8;
    let gray_value = (gray_step as f64 * 255.0 / 23.0).round() as i32;

    let cube_dist = distance_sq(pixel, cube_rgb);
    let gray_dist = distance_sq(pixel, (gray_value, gray_value, gray_value));

    if gray_dist < cube_dist {
        GRAY_RAMP_BASE + gray_step
    } else {
        cube_index as u8
    }
}

#[inline]
fn to_cube_level(channel: u8) -> u8 {
    (channel as f64 / 255.0 * 5.0).round() as u8
}

#[inline]
fn from_cube_level(level: u8) -> i32 {
    (level as f64 * 255.0 / 5.0).round() as i32
}

#[inline]
fn distance_sq(pixel: Pixel, (r, g, b): (i32, i32, i32)) -> i32 {
    let dr = pixel.r as i32 - r;
    let dg = pixel.g as i32 - g;
    let db = pixel.b as i32 - b;
    dr * dr + dg * dg + db * db
}
