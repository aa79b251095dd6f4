//! test data shared between the bitfont crates.

/// A complete 256 x 16 byte source in the C-array style bitmap fonts are
/// usually distributed in.
///
/// Only a few codepoints are drawn, see [`glyphs`] for their rows.
pub static ISO_SAMPLE: &str = include_str!("../test_data/iso_sample.c");

/// Codepoints drawn in [`ISO_SAMPLE`], in increasing order.
pub static ISO_SAMPLE_CODEPOINTS: &[u32] = &[
    0x01, 0x20, 0x21, 0x27, 0x2E, 0x30, 0x41, 0x48, 0x4C, 0xDB, 0xFF,
];

/// Rows for individual glyphs of [`ISO_SAMPLE`].
pub mod glyphs {
    /// Columns 2-5 only: a peak over a box with two legs.
    #[rustfmt::skip]
    pub static LATIN_A: [u8; 16] = [
        0x00, 0x00, 0x18, 0x3c,
        0x24, 0x24, 0x24, 0x3c,
        0x3c, 0x24, 0x24, 0x24,
        0x24, 0x00, 0x00, 0x00,
    ];

    /// A single stroke in column 1 with a foot along the bottom.
    #[rustfmt::skip]
    pub static LATIN_L: [u8; 16] = [
        0x00, 0x00, 0x40, 0x40,
        0x40, 0x40, 0x40, 0x40,
        0x40, 0x40, 0x40, 0x40,
        0x7e, 0x00, 0x00, 0x00,
    ];

    /// Left-heavy mark occupying columns 2 and 3.
    #[rustfmt::skip]
    pub static APOSTROPHE: [u8; 16] = [
        0x00, 0x30, 0x30, 0x30,
        0x20, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00,
    ];

    /// A zero with a hole and a slash through it.
    #[rustfmt::skip]
    pub static DIGIT_ZERO: [u8; 16] = [
        0x00, 0x00, 0x7c, 0xc6,
        0xc6, 0xce, 0xde, 0xf6,
        0xe6, 0xc6, 0xc6, 0x7c,
        0x00, 0x00, 0x00, 0x00,
    ];

    /// Alternating pixels; no two set pixels share an edge.
    #[rustfmt::skip]
    pub static CHECKERBOARD: [u8; 16] = [
        0xaa, 0x55, 0xaa, 0x55,
        0xaa, 0x55, 0xaa, 0x55,
        0xaa, 0x55, 0xaa, 0x55,
        0xaa, 0x55, 0xaa, 0x55,
    ];

    pub static FULL_BLOCK: [u8; 16] = [0xff; 16];

    /// The source draws a dot in the space slot; the compiled font must not.
    #[rustfmt::skip]
    pub static SPACE: [u8; 16] = [
        0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x18,
    ];
}
