//! Word document to HTML conversion
//!
//!     This crate turns a `.docx` package into a flat, clean HTML fragment governed by a small set
//!     of formatting rules (output tags, quote wrapping, special characters, search/replace).
//!
//!     TLDR:
//!         - Decoding lives in formats/docx: the zip container and its XML parts become the IR.
//!         - The IR (./ir/nodes.rs) is a typed, flat document: blocks, paragraphs, runs, tables.
//!         - The structural work (list nesting, run merging, hyperlink splicing) lives in ./common
//!           and is tested in isolation.
//!         - formats/html drives the common code through a two-state block dispatcher and applies
//!           the post-passes.
//!
//!     This is a pure lib: it powers makehtml-cli but is shell agnostic. No code here reads
//!     environment variables, prints, or decides where files go. Diagnostics go through `log`.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── formats
//!     │   ├── docx                # zip + WordprocessingML decoder
//!     │   └── html                # dispatcher, formatting rules
//!     ├── lib.rs
//!     ├── ir                      # Intermediate Representation
//!     └── common                  # hyperlinks, runs, lists, tables, post-passes
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── docx                    # decoding packages built in-test
//!     └── html                    # end-to-end conversions, snapshots, properties
//!
//!     Rust does not discover tests in subdirectories by default, so they are wired in through
//!     tests/lib.rs.
//!
//! Core Algorithms
//!
//!     Word stores documents flat. Lists are a sequence of paragraphs carrying a level, and
//!     hyperlinks are either wrapper elements or three-part field sequences spread across runs.
//!     Reconstructing the nesting is the heavy lifting:
//!
//!     - common/lists.rs rebuilds nested <ul>/<ol> trees from (level, kind, text) records.
//!     - common/hyperlinks.rs groups runs into hyperlink spans, from wrappers and from
//!       HYPERLINK fields.
//!     - common/runs.rs merges adjacent runs with equal formatting and splices the spans in.
//!
//!     Everything recoverable (a broken field, an unknown relationship, an odd level jump) degrades
//!     gracefully; only an unreadable package is an error.
pub mod error;
pub mod format;
pub mod formats;

pub mod common;
pub mod ir;

pub use error::ConvertError;
pub use format::Format;
pub use formats::{DocxFormat, FormattingRules, HtmlFormat};

use std::path::Path;

/// Converts a decoded document to HTML.
pub fn convert(doc: &ir::nodes::Document, rules: &FormattingRules) -> String {
    formats::html::serialize_to_html(doc, rules)
}

/// Decodes `.docx` bytes and converts them to HTML.
pub fn convert_docx(bytes: &[u8], rules: &FormattingRules) -> Result<String, ConvertError> {
    let doc = DocxFormat.parse(bytes)?;
    HtmlFormat::new(rules.clone()).serialize(&doc)
}

/// Reads a `.docx` file and converts it to HTML.
pub fn convert_docx_file(path: &Path, rules: &FormattingRules) -> Result<String, ConvertError> {
    let doc = DocxFormat.parse_file(path)?;
    HtmlFormat::new(rules.clone()).serialize(&doc)
}
