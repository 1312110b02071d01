//! Glyph table for luminance rendering.

/// Glyph ramp indexed by [`GlyphLevel`], sparse to dense.
///
/// The last four entries mirror the four before them (`@ # $ %` after
/// `% $ # @`), so the brightest pixels fall back to lighter glyphs.
/// Keep the table exactly as is; downstream output depends on it.
pub const GLYPH_TABLE: [char; 16] = [
    ' ', '.', ',', ':', ';', '+', '*', '?', '%', '$', '#', '@', '@', '#', '$', '%',
];

/// Number of glyph levels.
pub const GLYPH_LEVELS: u8 = GLYPH_TABLE.len() as u8;

/// Index into [`GLYPH_TABLE`], always in `0..16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GlyphLevel(u8);

impl GlyphLevel {
    /// Darkest level.
    pub const MIN: GlyphLevel = GlyphLevel(0);
    /// Brightest level.
    pub const MAX: GlyphLevel = GlyphLevel(GLYPH_LEVELS - 1);

    /// Level for a floored luminance value (0-255). 16 luminance steps per level.
    #[inline]
    pub fn from_luminance(luminance: u8) -> Self {
        GlyphLevel((luminance / 16).min(GLYPH_LEVELS - 1))
    }

    /// Create a level from a raw index, clamping to the valid range.
    pub fn new(index: u8) -> Self {
        GlyphLevel(index.min(GLYPH_LEVELS - 1))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// The glyph drawn for this level.
    #[inline]
    pub fn glyph(self) -> char {
        GLYPH_TABLE[self.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_sixteen_levels() {
        assert_eq!(GLYPH_TABLE.len(), 16);
        assert_eq!(GLYPH_TABLE[0], ' ');
        assert_eq!(GLYPH_TABLE[15], '%');
    }

    #[test]
    fn test_table_tail_mirrors() {
        assert_eq!(&GLYPH_TABLE[8..12], &['%', '$', '#', '@']);
        assert_eq!(&GLYPH_TABLE[12..16], &['@', '#', '$', '%']);
    }

    #[test]
    fn test_from_luminance_boundaries() {
        assert_eq!(GlyphLevel::from_luminance(0).index(), 0);
        assert_eq!(GlyphLevel::from_luminance(15).index(), 0);
        assert_eq!(GlyphLevel::from_luminance(16).index(), 1);
        assert_eq!(GlyphLevel::from_luminance(239).index(), 14);
        assert_eq!(GlyphLevel::from_luminance(240).index(), 15);
        assert_eq!(GlyphLevel::from_luminance(255).index(), 15);
    }

    #[test]
    fn test_new_clamps() {
        assert_eq!(GlyphLevel::new(200), GlyphLevel::MAX);
        assert_eq!(GlyphLevel::new(3).glyph(), ':');
    }
}
