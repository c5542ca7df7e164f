//! Run consolidation: a paragraph's runs to inline HTML.
//!
//! Word splits text into many runs even when their formatting is identical
//! (spell-check boundaries, revision marks, pasted text). Emitting one tag
//! group per run produces `<strong>Hello </strong><strong>World</strong>`;
//! consolidation merges consecutive runs with the same signature
//! `(bold, italic, underline, hyperlink)` into a single group instead.
//!
//! # The Algorithm
//!
//! Runs are walked in document order with three pieces of state:
//!
//! - the open [`FormatGroup`]: escaped text plus its signature,
//! - the open hyperlink, if the last runs belonged to one,
//! - the rendered inner HTML of that hyperlink.
//!
//! Entering, switching or leaving a hyperlink flushes the group and closes
//! the open link. A signature change flushes the group. Flushing wraps the
//! text as `<strong><em><u>text</u></em></strong>` (only the tags that
//! apply) and routes it to the link buffer or the paragraph output.
//!
//! Links whose runs were never walked (a wrapper without runs) are appended
//! at the end, each preceded by a space.

use crate::common::escape::escape_html;
use crate::common::hyperlinks::{Extraction, HyperlinkSpan, SpanId};
use crate::ir::nodes::Paragraph;
use std::collections::HashSet;

/// Formatting identity of a group. Runs merge only when these match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Signature {
    bold: bool,
    italic: bool,
    underline: bool,
    link: Option<SpanId>,
}

/// Consecutive runs sharing one signature.
#[derive(Debug, Default)]
struct FormatGroup {
    text: String,
    signature: Option<Signature>,
}

impl FormatGroup {
    /// Adds text under `signature`, flushing first when the signature changes.
    fn push(&mut self, signature: Signature, text: &str, out: &mut Output) {
        if self.signature != Some(signature) {
            self.flush(out);
            self.signature = Some(signature);
        }
        self.text.push_str(text);
    }

    /// Emits the accumulated text wrapped in its formatting tags.
    fn flush(&mut self, out: &mut Output) {
        if self.text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.text);
        let Some(signature) = self.signature else {
            out.result.push_str(&text);
            return;
        };

        let mut formatted = text;
        if signature.underline {
            formatted = format!("<u>{formatted}</u>");
        }
        if signature.italic {
            formatted = format!("<em>{formatted}</em>");
        }
        if signature.bold {
            formatted = format!("<strong>{formatted}</strong>");
        }

        if signature.link.is_some() {
            out.link_text.push_str(&formatted);
        } else {
            out.result.push_str(&formatted);
        }
    }
}

#[derive(Debug, Default)]
struct Output {
    result: String,
    link_text: String,
}

impl Output {
    /// Closes `span`, rendering the buffered inner HTML or the fallback.
    fn close_link(&mut self, span: &HyperlinkSpan) {
        let inner = std::mem::take(&mut self.link_text);
        let text = if inner.is_empty() {
            escape_html(span.display_text())
        } else {
            inner
        };
        self.result.push_str(&format_link(&span.url, &text));
    }
}

/// Renders an anchor. `text` is already HTML.
pub fn format_link(url: &str, text: &str) -> String {
    format!("<a href=\"{}\">{text}</a>", escape_html(url))
}

/// Consolidate `paragraph`'s runs into inline HTML.
pub fn consolidate_runs(paragraph: &Paragraph, links: &Extraction) -> String {
    let mut out = Output::default();
    let mut group = FormatGroup::default();
    let mut open_link: Option<&HyperlinkSpan> = None;
    let mut visited: HashSet<SpanId> = HashSet::new();

    for (run_id, run) in paragraph.runs() {
        let owner = links.owner_of(run_id);
        if let Some(span) = owner {
            visited.insert(span.id);
        }

        if run.text.is_empty() && owner.is_none() {
            continue;
        }

        if owner.map(|s| s.id) != open_link.map(|s| s.id) {
            group.flush(&mut out);
            if let Some(previous) = open_link {
                out.close_link(previous);
            }
            open_link = owner;
        }

        let signature = Signature {
            bold: run.bold,
            italic: run.italic,
            underline: run.underline && owner.is_none(),
            link: owner.map(|s| s.id),
        };
        group.push(signature, &escape_html(&run.text), &mut out);
    }

    group.flush(&mut out);
    if let Some(span) = open_link {
        out.close_link(span);
    }

    for span in &links.spans {
        if !visited.contains(&span.id) && !span.fallback_text.is_empty() {
            out.result.push(' ');
            out.result
                .push_str(&format_link(&span.url, &escape_html(&span.fallback_text)));
        }
    }

    out.result
}
