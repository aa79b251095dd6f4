//! Compile fixed-width bitmap fonts into scalable outline fonts.
//!
//! The input is the common "array of scanlines" representation of an 8x16
//! console font: 256 glyphs of 16 bytes each, every byte one row of eight
//! pixels with the most significant bit leftmost. Each set pixel becomes a
//! square in font units; the squares are handed to a [`FontEngine`] which
//! merges them into clean contours and serializes the font.
//!
//! # Example
//!
//! ```no_run
//! use bitfont::{compile_font, BitmapSource, BuildOptions, FontInfo, TrueTypeEngine};
//!
//! let source = BitmapSource::load("iso_font.c").unwrap();
//! let options = BuildOptions::default();
//! let mut engine = TrueTypeEngine::new(FontInfo::for_scale(options.scale));
//! let summary = compile_font(&source, &options, &mut engine).unwrap();
//! println!("{} glyphs", summary.registered.len());
//! ```

#![forbid(unsafe_code)]

mod bitmap;
mod compile;
mod engine;
mod error;
mod info;
mod names;
pub mod outline;
mod shape;
mod source;
mod truetype;

pub use bitmap::{GlyphBitmap, SideBearings};
pub use compile::{compile_font, write_font, BuildOptions, CompileSummary};
pub use engine::{FontEngine, GlyphSlot};
pub use error::Error;
pub use info::FontInfo;
pub use shape::{mirror_column, GlyphShape, PixelSquare};
pub use source::BitmapSource;
pub use truetype::{TrueTypeEngine, TrueTypeGlyph};

/// Width of every glyph, in pixels.
pub const FONT_WIDTH: u16 = 8;

/// Height of every glyph, in pixels (one byte per row).
pub const FONT_HEIGHT: u16 = 16;

/// Number of glyphs in a complete source.
pub const CODEPOINT_COUNT: u32 = 256;

/// Font units per pixel used when nothing else is requested.
pub const DEFAULT_PIXEL_SIZE: u16 = 64;

/// The codepoint that always ends up as an empty glyph in the output.
pub const SPACE: u32 = 0x20;
