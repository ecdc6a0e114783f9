//! Contains the crate error type.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Result type alias for `colorsage` operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The errors that can occur while building histograms and palettes.
#[derive(Error, Debug)]
pub enum Error {
    /// The image file could not be opened or read.
    #[error("failed to read {}: {source}", .path.display())]
    FileUnreadable {
        /// The path of the file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The image file was read, but its format is unknown, unsupported, or corrupt.
    #[error("failed to decode {}: {source}", .path.display())]
    UnsupportedOrCorruptFormat {
        /// The path of the file.
        path: PathBuf,
        /// The underlying decoding error.
        #[source]
        source: image::ImageError,
    },

    /// A string is not a 6 or 8 digit hex color.
    #[error("invalid hex color: {0:?}")]
    InvalidColorFormat(String),

    /// An operation needing at least one color was given none.
    #[error("expected at least one color")]
    EmptyInput,
}
