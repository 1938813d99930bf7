//! Error types for structure loading

use crate::parser::Format;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for load operations
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors that can occur while loading a structure file
///
/// Every variant is fatal to the load; a partial tree is never returned.
#[derive(Error, Debug)]
pub enum LoadError {
    /// File missing or not readable
    #[error("Cannot read structure file {}: {message}", .path.display())]
    FileUnreadable { path: PathBuf, message: String },

    /// File exists but contains no bytes
    #[error("Structure file is empty")]
    EmptyFile,

    /// File extension/hint is not a supported format
    #[error("Unsupported structure format '{0}' (supported: json, yaml, yml)")]
    UnsupportedFormat(String),

    /// Document failed to decode
    #[error("Invalid {format} in structure file: {message}\nHint: {}", .format.syntax_hint())]
    Decode { format: Format, message: String },

    /// Document decoded but the top-level mapping has no entries
    #[error("Structure file decodes to an empty mapping; nothing to create")]
    EmptyStructure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_carries_hint() {
        let err = LoadError::Decode {
            format: Format::Json,
            message: "expected value at line 1 column 2".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("JSON"));
        assert!(text.contains("expected value"));
        assert!(text.contains("trailing commas"));
    }

    #[test]
    fn test_unsupported_format_names_supported_set() {
        let text = LoadError::UnsupportedFormat("txt".to_string()).to_string();
        assert!(text.contains("txt"));
        assert!(text.contains("json"));
        assert!(text.contains("yaml"));
        assert!(text.contains("yml"));
    }
}
