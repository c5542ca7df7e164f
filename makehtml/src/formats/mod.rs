//! Format implementations
//!
//! `docx` decodes Word packages into the IR; `html` serializes the IR.

pub mod docx;
pub mod html;

pub use docx::DocxFormat;
pub use html::{FormattingRules, HtmlFormat};
