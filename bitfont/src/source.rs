//! Loading raw glyph rows from hex literals

use std::{path::Path, sync::LazyLock};

use regex::Regex;

use crate::{bitmap::GlyphBitmap, error::Error, FONT_HEIGHT};

// Not word-bounded: `0x123` contributes `0x12`.
static HEX_BYTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"0x([0-9a-fA-F]{2})").expect("hex byte pattern is valid"));

const ROWS_PER_GLYPH: usize = FONT_HEIGHT as usize;

/// The raw bytes of a bitmap font, one byte per scanline.
///
/// Glyphs are stored back to back in codepoint order, so the rows for
/// codepoint `n` start at `n * 16`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitmapSource {
    bytes: Vec<u8>,
}

impl BitmapSource {
    /// Extract every `0x`-prefixed two digit hex literal in `text`, in order.
    ///
    /// Anything that is not such a literal is ignored, so this accepts C or
    /// Rust array definitions, assembler listings and the like, comments
    /// included.
    pub fn parse(text: &str) -> Self {
        let bytes = HEX_BYTE
            .captures_iter(text)
            .filter_map(|caps| u8::from_str_radix(&caps[1], 16).ok())
            .collect();
        BitmapSource { bytes }
    }

    /// Read and [parse](Self::parse) the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let source = Self::parse(&text);
        log::debug!("read {} bytes from {}", source.len(), path.display());
        Ok(source)
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        BitmapSource {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The number of complete glyphs available.
    pub fn glyph_count(&self) -> usize {
        self.bytes.len() / ROWS_PER_GLYPH
    }

    /// The rows of the glyph at `codepoint`, if the source is long enough.
    pub fn glyph(&self, codepoint: u32) -> Option<GlyphBitmap> {
        let start = (codepoint as usize).checked_mul(ROWS_PER_GLYPH)?;
        let rows = self.bytes.get(start..start + ROWS_PER_GLYPH)?;
        rows.try_into().ok().map(GlyphBitmap::new)
    }

    /// Ensure every one of the first `codepoints` glyphs is present.
    pub fn check_coverage(&self, codepoints: u32) -> Result<(), Error> {
        let expected = codepoints as usize * ROWS_PER_GLYPH;
        if self.bytes.len() < expected {
            return Err(Error::TruncatedSource {
                expected,
                found: self.bytes.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_c_array() {
        let text = "/* 'A' */\nstatic unsigned char font[] = {\n    0x00, 0x7E,0xff,\n0XAB 0x1 0x0a };";
        let source = BitmapSource::parse(text);
        // `0XAB` has an uppercase prefix and `0x1` only one digit
        assert_eq!(source.as_bytes(), &[0x00, 0x7e, 0xff, 0x0a]);
    }

    #[test]
    fn long_literal_contributes_first_two_digits() {
        let source = BitmapSource::parse("0x123 0xabcd");
        assert_eq!(source.as_bytes(), &[0x12, 0xab]);
    }

    #[test]
    fn glyph_slicing() {
        let mut bytes = vec![0u8; 32];
        bytes[16] = 0x80;
        bytes[31] = 0x01;
        let source = BitmapSource::from_bytes(bytes);
        assert_eq!(source.glyph_count(), 2);
        assert!(source.glyph(0).unwrap().is_empty());
        let one = source.glyph(1).unwrap();
        assert_eq!(one.rows()[0], 0x80);
        assert_eq!(one.rows()[15], 0x01);
        assert!(source.glyph(2).is_none());
    }

    #[test]
    fn partial_glyph_is_missing() {
        let source = BitmapSource::from_bytes(vec![0xff; 20]);
        assert!(source.glyph(0).is_some());
        assert!(source.glyph(1).is_none());
        assert!(source.glyph(u32::MAX).is_none());
    }

    #[test]
    fn coverage() {
        let source = BitmapSource::parse(bitfont_test_data::ISO_SAMPLE);
        assert_eq!(source.len(), 4096);
        assert!(source.check_coverage(crate::CODEPOINT_COUNT).is_ok());

        let short = BitmapSource::from_bytes(vec![0; 100]);
        match short.check_coverage(crate::CODEPOINT_COUNT) {
            Err(Error::TruncatedSource { expected, found }) => {
                assert_eq!((expected, found), (4096, 100))
            }
            other => panic!("expected truncation error, got {other:?}"),
        }
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.c");
        assert!(matches!(
            BitmapSource::load(&path),
            Err(Error::Io { path: p, .. }) if p == path
        ));
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.c");
        std::fs::write(&path, bitfont_test_data::ISO_SAMPLE).unwrap();
        let source = BitmapSource::load(&path).unwrap();
        assert_eq!(
            source.glyph(0x41).unwrap().rows(),
            &bitfont_test_data::glyphs::LATIN_A
        );
    }
}
