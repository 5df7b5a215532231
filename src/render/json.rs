//! JSON rendering for alignments, reading orders and documents.

use crate::error::{Error, Result};
use serde::Serialize;
use std::io::Write;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize any result type to a JSON string.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Serialize any result type as JSON into a writer.
pub fn write_json<T: Serialize + ?Sized, W: Write>(
    writer: W,
    value: &T,
    format: JsonFormat,
) -> Result<()> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_writer_pretty(writer, value),
        JsonFormat::Compact => serde_json::to_writer(writer, value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
