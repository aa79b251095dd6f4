//! Glyph bitmaps and their horizontal extent

use crate::FONT_WIDTH;

/// The sixteen scanlines of a single glyph.
///
/// Bit 7 of each row is the leftmost pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GlyphBitmap([u8; 16]);

/// Blank space on either side of a glyph's ink, in font units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SideBearings {
    pub left: u32,
    pub right: u32,
}

impl GlyphBitmap {
    pub const fn new(rows: [u8; 16]) -> Self {
        GlyphBitmap(rows)
    }

    pub fn rows(&self) -> &[u8; 16] {
        &self.0
    }

    /// `true` if no pixel is set.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|row| *row == 0)
    }

    /// Whether the pixel at `row`, `column` is set; column 0 is leftmost.
    pub fn pixel(&self, row: usize, column: usize) -> bool {
        debug_assert!(column < FONT_WIDTH as usize);
        self.0
            .get(row)
            .is_some_and(|byte| (byte >> (7 - column)) & 1 == 1)
    }

    /// Iterate the `(row, column)` of every set pixel, in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.0.len()).flat_map(move |row| {
            (0..FONT_WIDTH as usize)
                .filter(move |column| self.pixel(row, *column))
                .map(move |column| (row, column))
        })
    }

    /// The number of set pixels.
    pub fn popcount(&self) -> u32 {
        self.0.iter().map(|row| row.count_ones()).sum()
    }

    /// A mask with a bit set for every column that is set in any row.
    pub fn column_mask(&self) -> u8 {
        self.0.iter().fold(0, |mask, row| mask | row)
    }

    /// Compute the blank columns on either side, scaled to font units.
    ///
    /// For an empty glyph both bearings are the full glyph width.
    pub fn side_bearings(&self, scale: u16) -> SideBearings {
        let mask = self.column_mask();
        let scale = scale as u32;
        // leading_zeros counts from bit 7, which is the leftmost column
        SideBearings {
            left: mask.leading_zeros() * scale,
            right: mask.trailing_zeros() * scale,
        }
    }
}

impl From<[u8; 16]> for GlyphBitmap {
    fn from(rows: [u8; 16]) -> Self {
        GlyphBitmap(rows)
    }
}

#[cfg(test)]
mod tests {
    use bitfont_test_data::glyphs;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::latin_a(glyphs::LATIN_A, 2, 2)]
    #[case::latin_l(glyphs::LATIN_L, 1, 1)]
    #[case::apostrophe(glyphs::APOSTROPHE, 2, 4)]
    #[case::full_block(glyphs::FULL_BLOCK, 0, 0)]
    #[case::checkerboard(glyphs::CHECKERBOARD, 0, 0)]
    #[case::rightmost_column([0x01; 16], 7, 0)]
    #[case::leftmost_pixel([0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], 0, 7)]
    fn bearings(#[case] rows: [u8; 16], #[case] left: u32, #[case] right: u32) {
        let glyph = GlyphBitmap::new(rows);
        assert_eq!(
            glyph.side_bearings(64),
            SideBearings {
                left: left * 64,
                right: right * 64
            }
        );
    }

    #[test]
    fn bearings_leave_room_for_ink() {
        let scale = 64;
        for byte in 1..=u8::MAX {
            for row in 0..16 {
                let mut rows = [0u8; 16];
                rows[row] = byte;
                let bearings = GlyphBitmap::new(rows).side_bearings(scale);
                assert!(bearings.left + bearings.right < FONT_WIDTH as u32 * scale as u32);
            }
        }
    }

    #[test]
    fn empty_glyph_bearings_are_full_width() {
        let glyph = GlyphBitmap::default();
        assert!(glyph.is_empty());
        assert_eq!(
            glyph.side_bearings(10),
            SideBearings {
                left: 80,
                right: 80
            }
        );
    }

    #[test]
    fn bearings_at_largest_scale() {
        let glyph = GlyphBitmap::new(glyphs::APOSTROPHE);
        let max = u16::MAX as u32;
        assert_eq!(
            glyph.side_bearings(u16::MAX),
            SideBearings {
                left: 2 * max,
                right: 4 * max
            }
        );
        assert_eq!(GlyphBitmap::default().side_bearings(u16::MAX).left, 8 * max);
    }

    #[test]
    fn row_order_does_not_matter() {
        let glyph = GlyphBitmap::new(glyphs::DIGIT_ZERO);
        let mut reversed = glyphs::DIGIT_ZERO;
        reversed.reverse();
        let mut rotated = glyphs::DIGIT_ZERO;
        rotated.rotate_left(5);
        let expected = glyph.side_bearings(64);
        assert_eq!(GlyphBitmap::new(reversed).side_bearings(64), expected);
        assert_eq!(GlyphBitmap::new(rotated).side_bearings(64), expected);
    }

    #[test]
    fn pixel_order_and_count() {
        let glyph = GlyphBitmap::new(glyphs::APOSTROPHE);
        let pixels = glyph.pixels().collect::<Vec<_>>();
        assert_eq!(
            pixels,
            vec![(1, 2), (1, 3), (2, 2), (2, 3), (3, 2), (3, 3), (4, 2)]
        );
        assert_eq!(glyph.popcount(), 7);
        assert_eq!(GlyphBitmap::new(glyphs::FULL_BLOCK).popcount(), 128);
    }
}
