//! Frame composition: pixels to styled glyph rows.

use serde::{Deserialize, Serialize};

use super::color::{AnsiColor, ColorLayer, ColorMode, RESET};
use super::glyphs::GlyphLevel;
use super::luminance::glyph_level;
use crate::error::Result;
use crate::raster::{Pixel, RasterFrame};

/// A glyph with its optional terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColoredGlyph {
    pub level: GlyphLevel,
    pub color: Option<AnsiColor>,
}

impl ColoredGlyph {
    pub fn glyph(&self) -> char {
        self.level.glyph()
    }

    /// Append this glyph to `out`. Colored glyphs are wrapped as
    /// `<escape><glyph><reset>` so styling never leaks into the next one.
    pub fn write_to(&self, layer: ColorLayer, out: &mut String) {
        match self.color {
            Some(color) => {
                // Writing to a String cannot fail
                let _ = color.write_escape(layer, out);
                out.push(self.glyph());
                out.push_str(RESET);
            }
            None => out.push(self.glyph()),
        }
    }

    /// This glyph serialized on its own.
    pub fn render(&self, layer: ColorLayer) -> String {
        let mut s = String::new();
        self.write_to(layer, &mut s);
        s
    }
}

/// One rendered frame: rows of text with embedded escape sequences,
/// top row first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frame {
    rows: Vec<String>,
}

impl Frame {
    pub fn new(rows: Vec<String>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn into_rows(self) -> Vec<String> {
        self.rows
    }
}

/// Turns smoothed raster frames into [`Frame`]s for a fixed color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Compositor {
    mode: ColorMode,
    layer: ColorLayer,
}

impl Compositor {
    pub fn new(mode: ColorMode, layer: ColorLayer) -> Self {
        Self { mode, layer }
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn layer(&self) -> ColorLayer {
        self.layer
    }

    /// Glyph and color for a single pixel.
    #[inline]
    pub fn stylize(&self, pixel: Pixel) -> ColoredGlyph {
        ColoredGlyph {
            level: glyph_level(pixel),
            color: self.mode.quantize(pixel),
        }
    }

    /// Styled glyphs for row `y`, left to right.
    pub fn glyph_row(&self, frame: &RasterFrame, y: u32) -> Vec<ColoredGlyph> {
        (0..frame.width)
            .map(|x| self.stylize(frame.pixel(x, y)))
            .collect()
    }

    /// Compose a whole frame in row-major order, origin top-left.
    ///
    /// `index` is the frame's position in source order, used for error
    /// reporting.
    pub fn compose(&self, frame: &RasterFrame, index: usize) -> Result<Frame> {
        frame.ensure_rgb(index)?;

        // Worst case per glyph: "\x1b[38;2;255;255;255m" + glyph + reset
        let per_glyph = if self.mode.is_colored() { 24 } else { 1 };
        let row_capacity = frame.width as usize * per_glyph;

        let rows = frame
            .rows()
            .map(|row| {
                let mut line = String::with_capacity(row_capacity);
                for rgb in row.chunks_exact(3) {
                    self.stylize(Pixel::new(rgb[0], rgb[1], rgb[2]))
                        .write_to(self.layer, &mut line);
                }
                line
            })
            .collect();

        Ok(Frame::new(rows))
    }
}
