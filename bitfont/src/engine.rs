//! The interface between the compiler and an outline font backend

use crate::{error::Error, shape::GlyphShape};

/// A font under construction.
///
/// The compiler only ever appends glyphs, then asks for hinting and the
/// final binary. Implementations own all glyph data.
pub trait FontEngine {
    type Glyph: GlyphSlot;

    /// Create the glyph for `codepoint`, replacing any existing one.
    ///
    /// The new glyph has no outline and no advance. `name` overrides the
    /// name the engine would otherwise pick.
    fn create_glyph(&mut self, codepoint: u32, name: Option<&str>) -> &mut Self::Glyph;

    /// Number of glyphs created so far, excluding any the engine adds itself.
    fn glyph_count(&self) -> usize;

    /// Mark the font as hinted.
    ///
    /// Engines may do this without generating any instructions, since the
    /// outlines are already aligned to the pixel grid.
    fn auto_hint(&mut self);

    /// Serialize the font.
    fn compile(&self) -> Result<Vec<u8>, Error>;
}

/// A single glyph owned by a [`FontEngine`].
pub trait GlyphSlot {
    /// Add the squares of `shape` to the outline.
    ///
    /// `shape` uses SVG coordinates: y grows downwards from the top of the
    /// glyph box, and columns are mirrored (see [`GlyphShape::from_bitmap`]).
    /// Implementations undo both.
    fn import_outline(&mut self, shape: &GlyphShape);

    fn set_advance(&mut self, advance: u16);

    /// Move the outline so its left edge sits at `lsb`.
    ///
    /// The advance changes by the distance the outline moved, keeping the
    /// right side bearing intact.
    fn set_left_side_bearing(&mut self, lsb: i32);

    /// Set the advance so there are `rsb` units right of the outline.
    fn set_right_side_bearing(&mut self, rsb: i32);

    /// Remove redundant points.
    fn simplify(&mut self);

    /// Merge overlapping contours.
    fn remove_overlap(&mut self);

    /// Round all coordinates to integers.
    fn round(&mut self);
}
