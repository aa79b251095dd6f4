//! Turning a bitmap source into glyphs

use std::path::{Path, PathBuf};

use crate::{
    engine::{FontEngine, GlyphSlot},
    error::Error,
    shape::GlyphShape,
    source::BitmapSource,
    CODEPOINT_COUNT, DEFAULT_PIXEL_SIZE, FONT_HEIGHT, FONT_WIDTH, SPACE,
};

/// The largest units per em OpenType allows.
const MAX_UNITS_PER_EM: u32 = 16384;

/// Settings for [`compile_font`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildOptions {
    /// Font units per pixel.
    pub scale: u16,
    /// Where to write one SVG per glyph, if anywhere.
    pub svg_dir: Option<PathBuf>,
    /// Skip glyphs missing from a short source instead of failing.
    pub allow_truncated: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            scale: DEFAULT_PIXEL_SIZE,
            svg_dir: Some(PathBuf::from("glyph_svgs")),
            allow_truncated: false,
        }
    }
}

impl BuildOptions {
    /// The advance width of every glyph, in font units.
    ///
    /// Saturates for scales too large to be valid.
    pub fn advance(&self) -> u16 {
        FONT_WIDTH.saturating_mul(self.scale)
    }

    fn validate(&self) -> Result<(), Error> {
        let em = FONT_HEIGHT as u32 * self.scale as u32;
        if self.scale == 0 || em > MAX_UNITS_PER_EM {
            return Err(Error::InvalidScale(self.scale));
        }
        Ok(())
    }
}

/// What [`compile_font`] did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompileSummary {
    /// Codepoints with an outline, in increasing order.
    pub registered: Vec<u32>,
    /// Codepoints with no pixels set, or missing from a short source.
    pub skipped: Vec<u32>,
    pub svg_files: Vec<PathBuf>,
}

/// Add a glyph to `engine` for every non-empty bitmap in `source`.
///
/// U+0020 is always present afterwards, with no outline, whatever the
/// source contains. The engine is hinted but not compiled; see
/// [`write_font`].
pub fn compile_font<E: FontEngine>(
    source: &BitmapSource,
    options: &BuildOptions,
    engine: &mut E,
) -> Result<CompileSummary, Error> {
    options.validate()?;
    match source.check_coverage(CODEPOINT_COUNT) {
        Err(e @ Error::TruncatedSource { .. }) if options.allow_truncated => {
            log::warn!("{e}, missing glyphs are skipped")
        }
        other => other?,
    }

    let advance = options.advance();
    let mut summary = CompileSummary::default();
    for codepoint in 0..CODEPOINT_COUNT {
        log::info!("processing glyph {codepoint:03}");
        let Some(bitmap) = source.glyph(codepoint).filter(|bitmap| !bitmap.is_empty()) else {
            log::debug!("glyph {codepoint:03} is empty, skipping");
            summary.skipped.push(codepoint);
            continue;
        };

        let bearings = bitmap.side_bearings(options.scale);
        log::debug!(
            "glyph {codepoint:03}: left bearing {}, right bearing {}",
            bearings.left,
            bearings.right
        );
        let shape = GlyphShape::from_bitmap(&bitmap, options.scale);
        if let Some(dir) = &options.svg_dir {
            summary.svg_files.push(shape.write_svg(dir, codepoint)?);
        }

        let glyph = engine.create_glyph(codepoint, None);
        glyph.import_outline(&shape);
        glyph.set_advance(advance);
        glyph.set_left_side_bearing(bearings.left as i32);
        glyph.set_right_side_bearing(bearings.right as i32);
        glyph.simplify();
        glyph.remove_overlap();
        glyph.round();
        summary.registered.push(codepoint);
    }

    engine
        .create_glyph(SPACE, Some("space"))
        .set_advance(advance);
    summary.registered.retain(|cp| *cp != SPACE);
    engine.auto_hint();
    log::info!(
        "registered {} glyphs, skipped {}",
        engine.glyph_count(),
        summary.skipped.len()
    );
    Ok(summary)
}

/// Compile `engine` and write the font to `path`.
pub fn write_font<E: FontEngine>(engine: &E, path: impl AsRef<Path>) -> Result<(), Error> {
    let path = path.as_ref();
    let data = engine.compile()?;
    std::fs::write(path, &data).map_err(|e| Error::io(path, e))?;
    log::info!("wrote {} bytes to {}", data.len(), path.display());
    Ok(())
}
