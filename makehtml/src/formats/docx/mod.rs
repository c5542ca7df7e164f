//! Docx format implementation
//!
//! Parsing only: a `.docx` package (zip container) is decoded into the
//! [`Document`] IR that the HTML serializer consumes.
//!
//! # Library Choice
//!
//! `zip` opens the container and `roxmltree` reads the WordprocessingML
//! parts. The decoder only needs read-only, namespace-aware tree access, so
//! a full document object model is unnecessary.
//!
//! # Parts
//!
//! | Part                             | Used for                                  | When absent            |
//! |----------------------------------|-------------------------------------------|------------------------|
//! | `word/document.xml`              | body blocks, runs, fields, hyperlinks     | error                  |
//! | `word/_rels/document.xml.rels`   | hyperlink relationship targets            | no external links      |
//! | `word/styles.xml`                | style id → display name                   | ids used as names      |
//! | `word/numbering.xml`             | bullet vs. numbered list levels           | lists default to `ul`  |

mod package;
mod parser;
mod xml;

pub use parser::parse_docx;

use crate::error::ConvertError;
use crate::format::Format;
use crate::ir::nodes::Document;
use std::path::Path;

/// Format implementation for Word documents
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxFormat;

impl DocxFormat {
    /// Read and decode a `.docx` file.
    pub fn parse_file(&self, path: &Path) -> Result<Document, ConvertError> {
        let bytes = std::fs::read(path)?;
        self.parse(&bytes)
    }
}

impl Format for DocxFormat {
    fn name(&self) -> &str {
        "docx"
    }

    fn description(&self) -> &str {
        "Office Open XML word-processing document"
    }

    fn file_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &[u8]) -> Result<Document, ConvertError> {
        parse_docx(source)
    }
}
