//! Pixel-to-glyph quantization pipeline.
//!
//! Converts smoothed RGB frames into rows of terminal text:
//!
//! 1. **Smoothing** - bilateral blur to suppress per-pixel noise
//! 2. **Luminance** - BT.601 luminance picks one of 16 glyph levels
//! 3. **Color** - the run's [`ColorMode`] picks a terminal color code
//! 4. **Composition** - glyphs and codes are joined into row strings
//!
//! # Color Modes
//!
//! - `Grayscale` - glyphs only
//! - `Ansi16` - 8 palette colors bucketed by luminance
//! - `Ansi256` - nearest 6x6x6 cube color or grayscale ramp step
//! - `TrueColor` - 24-bit RGB

mod color;
mod compose;
mod glyphs;
mod luminance;
mod smoothing;

pub use color::{ansi16_index, ansi256_index, AnsiColor, ColorLayer, ColorMode, RESET};
pub use compose::{ColoredGlyph, Compositor, Frame};
pub use glyphs::{GlyphLevel, GLYPH_LEVELS, GLYPH_TABLE};
pub use luminance::{glyph_level, luminance};
pub use smoothing::{BilateralFilter, DIAMETER, SIGMA_COLOR, SIGMA_SPACE};
