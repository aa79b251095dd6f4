//! Errors that occur while compiling a font

use std::path::PathBuf;

use thiserror::Error;
use write_fonts::{tables::cmap::CmapConflict, BuilderError};

/// An error that aborts compilation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("Failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Bitmap source has {found} bytes, at least {expected} are required")]
    TruncatedSource { expected: usize, found: usize },

    #[error("Invalid pixel size {0}: units per em must be in 16..=16384")]
    InvalidScale(u16),

    #[error("Malformed outline for U+{codepoint:04X}: {reason}")]
    MalformedOutline { codepoint: u32, reason: String },

    #[error("Failed to compile glyph U+{codepoint:04X}: {source}")]
    Glyph {
        codepoint: u32,
        #[source]
        source: write_fonts::error::Error,
    },

    #[error(transparent)]
    Cmap(#[from] CmapConflict),

    #[error(transparent)]
    Table(#[from] BuilderError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
