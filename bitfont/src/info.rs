//! Font-wide metadata

use crate::{DEFAULT_PIXEL_SIZE, FONT_HEIGHT};

/// Names and vertical metrics of the compiled font.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontInfo {
    pub family_name: String,
    pub subfamily_name: String,
    pub full_name: String,
    pub postscript_name: String,
    pub copyright: String,
    pub version: String,
    pub units_per_em: u16,
    pub ascent: i16,
    pub descent: i16,
}

impl FontInfo {
    /// The default metadata, with the em box sized to a glyph of `scale`
    /// units per pixel.
    ///
    /// The em is the full glyph height and sits entirely above the baseline.
    pub fn for_scale(scale: u16) -> Self {
        let em = FONT_HEIGHT.saturating_mul(scale);
        FontInfo {
            units_per_em: em,
            ascent: em.min(i16::MAX as u16) as i16,
            descent: 0,
            ..Default::default()
        }
    }

    /// The unique font identifier, name ID 3.
    pub(crate) fn unique_id(&self) -> String {
        format!("{};{}", self.version, self.postscript_name)
    }
}

impl Default for FontInfo {
    fn default() -> Self {
        let em = FONT_HEIGHT * DEFAULT_PIXEL_SIZE;
        FontInfo {
            family_name: "Darwin Bitmap 8x16".into(),
            subfamily_name: "Regular".into(),
            full_name: "Darwin Bitmap 8x16 Pixel Font".into(),
            postscript_name: "DarwinBitmap8x16".into(),
            copyright: "Copyright (c) 2000 Ka-Ping Yee <ping@lfw.org>".into(),
            version: "Version 1.000".into(),
            units_per_em: em,
            ascent: em as i16,
            descent: 0,
        }
    }
}
