//! Format trait definition
//!
//! This module defines the Format trait shared by the document decoder and
//! the HTML serializer. A format can parse (bytes → Document), serialize
//! (Document → text), or both.

use crate::error::ConvertError;
use crate::ir::nodes::Document;
use std::path::Path;

/// Trait for document formats
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn supports_parsing(&self) -> bool {
///         true
///     }
///
///     fn parse(&self, source: &[u8]) -> Result<Document, ConvertError> {
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "docx", "html")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → Document)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (Document → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Whether `path` carries one of this format's extensions, ignoring case.
    fn matches_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.file_extensions()
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
    }

    /// Parse raw source bytes into a Document
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &[u8]) -> Result<Document, ConvertError> {
        Err(ConvertError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Serialize a Document into text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _doc: &Document) -> Result<String, ConvertError> {
        Err(ConvertError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }
}
