//! Error types for conversion operations

use thiserror::Error;

/// Errors that can occur while decoding or converting a document.
///
/// Everything recoverable (broken hyperlinks, odd list levels, missing
/// options) is handled inside the engine; only a document that cannot be
/// read at all ends up here.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The input is not a readable zip package
    #[error("invalid document container: {0}")]
    Container(#[from] zip::result::ZipError),
    /// A required package part is absent
    #[error("missing document part '{0}' (is this a .docx file?)")]
    MissingPart(String),
    /// A package part is not well-formed XML
    #[error("XML parse error in '{part}': {message}")]
    Xml { part: String, message: String },
    /// The main document part lacks the expected structure
    #[error("malformed document: {0}")]
    Malformed(String),
    /// Format does not support the requested operation
    #[error("operation not supported: {0}")]
    NotSupported(String),
}
