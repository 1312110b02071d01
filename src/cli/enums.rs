//! CLI enum types for color options.

use clap::ValueEnum;

use crate::ascii::ColorMode;

/// Terminal color mode for the rendered frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Glyphs only, no escape sequences
    #[value(aliases = ["gray", "none"])]
    Grayscale,
    /// 16-color palette
    #[value(name = "16-color", aliases = ["16color", "ansi16"])]
    Ansi16,
    /// 256-color palette
    #[value(name = "256-color", aliases = ["256color", "8bit", "ansi256"])]
    Ansi256,
    /// 24-bit RGB
    #[value(aliases = ["24bit", "rgb"])]
    Truecolor,
}

impl From<ColorChoice> for ColorMode {
    fn from(c: ColorChoice) -> Self {
        match c {
            ColorChoice::Grayscale => ColorMode::Grayscale,
            ColorChoice::Ansi16 => ColorMode::Ansi16,
            ColorChoice::Ansi256 => ColorMode::Ansi256,
            ColorChoice::Truecolor => ColorMode::TrueColor,
        }
    }
}
