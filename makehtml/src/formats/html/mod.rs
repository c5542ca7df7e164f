//! HTML format implementation
//!
//! Serialization only: a decoded Word document becomes a flat sequence of
//! HTML fragments joined by newlines. There is no `<html>`/`<body>` wrapper;
//! the output is meant to be pasted into a page or a CMS.
//!
//! # Element Mapping Table
//!
//! | Word element              | HTML                                         | Notes                                   |
//! |---------------------------|----------------------------------------------|-----------------------------------------|
//! | Paragraph, style Heading* | `<h3>` (configurable)                        | Plain escaped text, no inline markup    |
//! | Paragraph                 | `<p>` (configurable)                         | Optionally wrapped when quote-heavy     |
//! | List paragraph            | `<ul>`/`<ol>` + `<li>`                       | Nesting rebuilt from levels             |
//! | Table                     | `<table>` `<thead>` `<tbody>`                | First row is the header                 |
//! | Bold / Italic / Underline | `<strong>` / `<em>` / `<u>`                  | Adjacent runs with equal format merged  |
//! | `w:hyperlink`             | `<a href>`                                   | Relationship target or `#anchor`        |
//! | HYPERLINK field           | `<a href>`                                   | URL from the field instruction          |
//!
//! After assembly two post-passes run over the whole output: special
//! character wrapping, then search/replace rules.

pub mod formatting_rules;
mod serializer;

pub use formatting_rules::{
    parse_wrap_tag, CharacterRule, FormattingRules, QuoteDetection, ReplacementRule,
};
pub use serializer::{classify_list_item, render_blocks, render_inline, serialize_to_html};

use crate::error::ConvertError;
use crate::format::Format;
use crate::ir::nodes::Document;

/// Format implementation for HTML
#[derive(Debug, Clone, Default)]
pub struct HtmlFormat {
    rules: FormattingRules,
}

impl HtmlFormat {
    /// Create a new HTML format with the given rules
    pub fn new(rules: FormattingRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &FormattingRules {
        &self.rules
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML fragment with configurable tags and post-processing"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, ConvertError> {
        Ok(serialize_to_html(doc, &self.rules))
    }
}
