//! Vector descriptions of glyph bitmaps
//!
//! A [`GlyphShape`] is the list of filled squares for a glyph, positioned in
//! an SVG-style coordinate system (origin top left, y growing downwards).

use std::{
    fmt::Write,
    path::{Path, PathBuf},
};

use crate::{bitmap::GlyphBitmap, error::Error, FONT_HEIGHT, FONT_WIDTH};

/// A filled, axis-aligned square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelSquare {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}

/// The filled squares of one glyph, plus the box they are drawn in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphShape {
    pub width: u32,
    pub height: u32,
    pub squares: Vec<PixelSquare>,
}

/// Reflect a column about the vertical axis of the glyph.
///
/// Applying this twice returns the original column.
pub const fn mirror_column(column: usize) -> usize {
    FONT_WIDTH as usize - 1 - column
}

impl GlyphShape {
    /// One square per set pixel, in row-major order.
    ///
    /// Columns are mirrored, so column 0 ends up at the right edge. An
    /// engine's outline import mirrors them back, leaving ink on the
    /// source columns in the compiled glyph.
    pub fn from_bitmap(bitmap: &GlyphBitmap, scale: u16) -> Self {
        let scale = scale as u32;
        let squares = bitmap
            .pixels()
            .map(|(row, column)| PixelSquare {
                x: mirror_column(column) as u32 * scale,
                y: row as u32 * scale,
                size: scale,
            })
            .collect();
        GlyphShape {
            width: FONT_WIDTH as u32 * scale,
            height: FONT_HEIGHT as u32 * scale,
            squares,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    /// Render as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let (w, h) = (self.width, self.height);
        let mut svg = String::from("<?xml version=\"1.0\" standalone=\"no\"?>\n");
        // writing to a String cannot fail
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">"
        );
        for PixelSquare { x, y, size } in &self.squares {
            let _ = write!(
                svg,
                "\n<rect x=\"{x}\" y=\"{y}\" width=\"{size}\" height=\"{size}\" fill=\"#000\" />"
            );
        }
        svg.push_str("\n</svg>");
        svg
    }

    /// Write the [SVG](Self::to_svg) to `dir/glyph_<codepoint>.svg`.
    ///
    /// The directory is created if it does not exist.
    pub fn write_svg(&self, dir: &Path, codepoint: u32) -> Result<PathBuf, Error> {
        std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        let path = dir.join(svg_file_name(codepoint));
        std::fs::write(&path, self.to_svg()).map_err(|e| Error::io(&path, e))?;
        Ok(path)
    }
}

pub(crate) fn svg_file_name(codepoint: u32) -> String {
    format!("glyph_{codepoint}.svg")
}
