//! Error types for pqreport.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::model::BlockKind;

/// Result type alias for pqreport operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or rendering a report.
#[derive(Error, Debug)]
pub enum Error {
    /// The destination could not be written.
    #[error("Cannot write {}: {source}", path.display())]
    Write {
        /// Destination path requested by the caller
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// A block could not be measured or paginated.
    #[error("Cannot lay out block #{block} ({kind}): {reason}")]
    Layout {
        /// Zero-based index of the block in the document
        block: usize,
        /// Kind of the offending block
        kind: BlockKind,
        /// What went wrong
        reason: String,
    },

    /// A style name was not found in the style sheet.
    #[error("Unknown style: {0}")]
    UnknownStyle(String),

    /// Error building, serializing or reading PDF objects.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// I/O error when reading files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during rendering of a non-PDF view (text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Build a [`Error::Write`] for the given destination.
    pub fn write(path: impl AsRef<Path>, source: io::Error) -> Self {
        Error::Write {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Build a [`Error::Layout`] for the block at `block`.
    pub fn layout(block: usize, kind: BlockKind, reason: impl Into<String>) -> Self {
        Error::Layout {
            block,
            kind,
            reason: reason.into(),
        }
    }

    /// Check if this is a write failure.
    pub fn is_write(&self) -> bool {
        matches!(self, Error::Write { .. })
    }

    /// Check if this is a layout failure.
    pub fn is_layout(&self) -> bool {
        matches!(self, Error::Layout { .. })
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::Pdf(err.to_string()),
        }
    }
}
