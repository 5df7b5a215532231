//! Error types for pagealign library.

use std::io;
use thiserror::Error;

/// Result type alias for pagealign operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading pages or emitting results.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input is not valid JSON or a field has the wrong type.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required field is absent from the structured input.
    #[error("Missing required field `{field}` at {location}")]
    MissingField {
        /// Name of the absent field
        field: &'static str,
        /// Path to the offending object (e.g. `pages[0].blocks[2].lines[1]`)
        location: String,
    },

    /// Coordinates that cannot be used for geometry (NaN, infinite).
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A line reference key could not be parsed.
    #[error("Invalid line reference: {0}")]
    InvalidLineRef(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Error during rendering (JSON, text, report).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    pub(crate) fn missing(field: &'static str, location: impl Into<String>) -> Self {
        Error::MissingField {
            field,
            location: location.into(),
        }
    }
}
