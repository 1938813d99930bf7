//! Structure file parser
//!
//! Decodes raw JSON or YAML bytes into a [`DirTree`] and validates that the
//! result actually describes something to create.

use crate::error::{LoadError, LoadResult};
use crate::tree::DirTree;
use std::fmt;
use std::fs;
use std::path::Path;

/// Supported structure file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Resolve a format hint (normally a file extension, without the dot)
    ///
    /// Recognizes `json`, `yaml`, and `yml`, case-insensitively.
    pub fn from_hint(hint: &str) -> Option<Self> {
        match hint.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Guidance appended to decode errors, pointing at the usual mistakes
    /// for the format.
    pub fn syntax_hint(self) -> &'static str {
        match self {
            Self::Json => {
                "check that brackets and quotes are balanced and there are no trailing commas"
            }
            Self::Yaml => {
                "check indentation (spaces, not tabs), a space after each colon, \
                 and quoting of special characters"
            }
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Yaml => write!(f, "YAML"),
        }
    }
}

/// Parse structure bytes into a directory tree
///
/// `hint` selects the decoder and is normally the file extension. The
/// decoded document must be a mapping from directory name to nested mapping
/// or null; any other shape fails with [`LoadError::Decode`].
///
/// # Errors
/// Returns an error if the bytes are empty, the hint is not a supported
/// format, the document fails to decode, or the decoded mapping is empty.
pub fn parse(bytes: &[u8], hint: &str) -> LoadResult<DirTree> {
    if bytes.is_empty() {
        return Err(LoadError::EmptyFile);
    }

    let format = Format::from_hint(hint).ok_or_else(|| {
        LoadError::UnsupportedFormat(hint.to_string())
    })?;

    let tree: DirTree = match format {
        Format::Json => serde_json::from_slice(bytes).map_err(|e| LoadError::Decode {
            format,
            message: e.to_string(),
        })?,
        Format::Yaml => serde_yml::from_slice(bytes).map_err(|e| LoadError::Decode {
            format,
            message: e.to_string(),
        })?,
    };

    if tree.is_empty() {
        return Err(LoadError::EmptyStructure);
    }

    Ok(tree)
}

/// Load and parse a structure file, deriving the format from its extension
///
/// # Errors
/// Returns an error if the file cannot be read or [`parse`] rejects its
/// contents.
pub fn load_structure(path: &Path) -> LoadResult<DirTree> {
    let bytes = fs::read(path).map_err(|e| LoadError::FileUnreadable {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let hint = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();

    parse(&bytes, hint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_nested() {
        let tree = parse(br#"{"src": {"api": null, "db": null}, "docs": null}"#, "json").unwrap();
        assert_eq!(tree.count_nodes(), 4);
    }

    #[test]
    fn test_parse_yaml_nested() {
        let doc = b"src:\n  api:\n  db:\ndocs:\n";
        let tree = parse(doc, "yaml").unwrap();
        assert_eq!(tree.count_nodes(), 4);
        let src = tree.get("src").unwrap().expect("src should have children");
        assert_eq!(src.len(), 2);
    }

    #[test]
    fn test_parse_yml_hint() {
        assert!(parse(b"a:\n", "yml").is_ok());
    }

    #[test]
    fn test_hint_is_case_insensitive() {
        assert!(parse(br#"{"a": null}"#, "JSON").is_ok());
        assert!(parse(b"a:\n", "YAML").is_ok());
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse(b"", "json"), Err(LoadError::EmptyFile)));
    }

    #[test]
    fn test_unsupported_hint() {
        match parse(b"whatever", "txt") {
            Err(LoadError::UnsupportedFormat(hint)) => assert_eq!(hint, "txt"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_json_object_rejected() {
        assert!(matches!(parse(b"{}", "json"), Err(LoadError::EmptyStructure)));
    }

    #[test]
    fn test_null_child_is_leaf() {
        let tree = parse(br#"{"a": null}"#, "json").unwrap();
        assert_eq!(tree.count_nodes(), 1);
        assert!(tree.get("a").unwrap().is_none());
    }

    #[test]
    fn test_malformed_json_preserves_decoder_message() {
        match parse(br#"{"a": }"#, "json") {
            Err(LoadError::Decode { format, message }) => {
                assert_eq!(format, Format::Json);
                assert!(!message.is_empty());
            }
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_yaml_is_decode_error() {
        let doc = b"a:\n  - :\n :bad";
        assert!(matches!(
            parse(doc, "yaml"),
            Err(LoadError::Decode { format: Format::Yaml, .. })
        ));
    }

    #[test]
    fn test_scalar_value_rejected_at_depth() {
        assert!(matches!(
            parse(br#"{"a": {"b": "not a mapping"}}"#, "json"),
            Err(LoadError::Decode { .. })
        ));
    }

    #[test]
    fn test_load_structure_missing_file() {
        let result = load_structure(Path::new("/nonexistent/structure.json"));
        assert!(matches!(result, Err(LoadError::FileUnreadable { .. })));
    }
}
