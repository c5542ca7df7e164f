//! Hyperlink extraction for a single paragraph.
//!
//! Word encodes hyperlinks two ways:
//!
//! - **Wrappers**: a `w:hyperlink` element around the link runs, whose target
//!   is either a relationship id (external URL) or a `w:anchor` bookmark.
//! - **Field codes**: a flat run sequence
//!   `begin → instrText "HYPERLINK \"url\"" → separate → result runs → end`.
//!
//! Both are reduced to [`HyperlinkSpan`]s: the target plus the ids of the
//! runs rendered inside the link. Wrapper spans come first (document order),
//! field spans after them.
//!
//! A field that does not form a complete hyperlink never fails the
//! conversion. It yields no span and is reported as a [`FieldDiagnostic`]
//! instead, so callers can see why a link went missing.

use crate::ir::nodes::{FieldMarker, HyperlinkElement, Inline, Paragraph, Relationships, Run, RunId};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static HYPERLINK_TARGET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"HYPERLINK\s+"([^"]+)""#).expect("hyperlink pattern is valid"));

/// Identity of a span, unique within its paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanId {
    /// The n-th `w:hyperlink` wrapper of the paragraph
    Explicit(usize),
    /// The n-th hyperlink field code that produced a span
    Field(usize),
}

/// One hyperlink and the runs it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct HyperlinkSpan {
    pub id: SpanId,
    pub url: String,
    pub runs: Vec<RunId>,
    /// Text shown when none of the member runs renders anything. May be
    /// empty; a visited link then shows its URL, an unvisited one is dropped.
    pub fallback_text: String,
}

impl HyperlinkSpan {
    pub fn contains(&self, run: RunId) -> bool {
        self.runs.contains(&run)
    }

    /// The fallback text, or the URL when there is none.
    pub fn display_text(&self) -> &str {
        if self.fallback_text.is_empty() {
            &self.url
        } else {
            &self.fallback_text
        }
    }
}

/// Why a field code did not (fully) form a hyperlink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDiagnosticKind {
    /// A separate/end marker, or the end of the paragraph, came before any
    /// `HYPERLINK` instruction
    MissingInstruction,
    /// A `HYPERLINK` instruction without a quoted target
    MalformedInstruction,
    /// No separate marker after the instruction
    MissingSeparator,
    /// The result ran to the end of the paragraph without an end marker
    MissingEnd,
    /// The result section holds no runs
    EmptyResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDiagnostic {
    /// The run carrying the field's begin marker
    pub begin: RunId,
    pub kind: FieldDiagnosticKind,
}

/// Spans of one paragraph plus the diagnostics of its field codes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub spans: Vec<HyperlinkSpan>,
    pub diagnostics: Vec<FieldDiagnostic>,
}

impl Extraction {
    /// The span owning `run`, if any.
    pub fn owner_of(&self, run: RunId) -> Option<&HyperlinkSpan> {
        self.spans.iter().find(|span| span.contains(run))
    }
}

/// Extract every hyperlink of `paragraph`.
pub fn extract_hyperlinks(paragraph: &Paragraph, relationships: &Relationships) -> Extraction {
    let mut extraction = Extraction {
        spans: extract_wrapper_hyperlinks(paragraph, relationships),
        diagnostics: Vec::new(),
    };

    let runs: Vec<(RunId, &Run)> = paragraph.runs().collect();
    extract_field_hyperlinks(&runs, &mut extraction);

    extraction
}

fn extract_wrapper_hyperlinks(
    paragraph: &Paragraph,
    relationships: &Relationships,
) -> Vec<HyperlinkSpan> {
    let mut spans = Vec::new();
    let mut next_run = 0;
    let mut wrapper_idx = 0;

    for inline in &paragraph.content {
        match inline {
            Inline::Run(_) => next_run += 1,
            Inline::Hyperlink(link) => {
                let members: Vec<RunId> =
                    (next_run..next_run + link.runs.len()).map(RunId).collect();
                next_run += link.runs.len();
                let idx = wrapper_idx;
                wrapper_idx += 1;

                let Some(url) = resolve_wrapper_target(link, relationships) else {
                    debug!("dropping hyperlink wrapper {idx}: no resolvable target");
                    continue;
                };

                spans.push(HyperlinkSpan {
                    id: SpanId::Explicit(idx),
                    url,
                    runs: members,
                    fallback_text: link.text.clone().unwrap_or_default(),
                });
            }
        }
    }

    spans
}

fn resolve_wrapper_target(link: &HyperlinkElement, relationships: &Relationships) -> Option<String> {
    let resolved = link.relationship_id.as_deref().and_then(|id| {
        let target = relationships.resolve(id).filter(|t| !t.is_empty());
        if target.is_none() {
            debug!("unknown hyperlink relationship '{id}'");
        }
        target
    });

    match (resolved, link.anchor.as_deref()) {
        (Some(target), _) => Some(target.to_string()),
        (None, Some(anchor)) if !anchor.is_empty() => Some(format!("#{anchor}")),
        _ => None,
    }
}

/// Outcome of reading one field starting at its begin marker.
enum FieldRead {
    /// No usable `HYPERLINK` instruction; the scan continues after the begin marker
    Rejected(FieldDiagnosticKind),
    Hyperlink {
        url: String,
        members: Vec<RunId>,
        text: String,
        separated: bool,
        terminated: bool,
        /// First run after the field
        resume: usize,
    },
}

fn extract_field_hyperlinks(runs: &[(RunId, &Run)], extraction: &mut Extraction) {
    let mut cursor = 0;
    let mut field_idx = 0;

    while cursor < runs.len() {
        let (begin, run) = runs[cursor];
        if run.field != Some(FieldMarker::Begin) {
            cursor += 1;
            continue;
        }

        match read_field(runs, cursor) {
            FieldRead::Rejected(kind) => {
                report(extraction, begin, kind);
                cursor += 1;
            }
            FieldRead::Hyperlink {
                url,
                members,
                text,
                separated,
                terminated,
                resume,
            } => {
                if !separated {
                    report(extraction, begin, FieldDiagnosticKind::MissingSeparator);
                } else if members.is_empty() {
                    report(extraction, begin, FieldDiagnosticKind::EmptyResult);
                } else {
                    if !terminated {
                        report(extraction, begin, FieldDiagnosticKind::MissingEnd);
                    }
                    extraction.spans.push(HyperlinkSpan {
                        id: SpanId::Field(field_idx),
                        url,
                        runs: members,
                        fallback_text: text,
                    });
                    field_idx += 1;
                }
                cursor = resume;
            }
        }
    }
}

fn read_field(runs: &[(RunId, &Run)], begin: usize) -> FieldRead {
    let mut pos = begin + 1;
    let mut url = None;

    while pos < runs.len() {
        let run = runs[pos].1;
        if let Some(instruction) = run.instruction.as_deref().map(str::trim) {
            if instruction.starts_with("HYPERLINK") {
                match HYPERLINK_TARGET.captures(instruction) {
                    Some(captures) => url = Some(captures[1].to_string()),
                    None => return FieldRead::Rejected(FieldDiagnosticKind::MalformedInstruction),
                }
                break;
            }
        }
        if matches!(run.field, Some(FieldMarker::Separate | FieldMarker::End)) {
            return FieldRead::Rejected(FieldDiagnosticKind::MissingInstruction);
        }
        pos += 1;
    }

    let Some(url) = url else {
        return FieldRead::Rejected(FieldDiagnosticKind::MissingInstruction);
    };

    let mut separated = false;
    while pos < runs.len() {
        let is_separator = runs[pos].1.field == Some(FieldMarker::Separate);
        pos += 1;
        if is_separator {
            separated = true;
            break;
        }
    }

    let mut members = Vec::new();
    let mut text = String::new();
    let mut terminated = false;
    while pos < runs.len() {
        let (id, run) = runs[pos];
        if run.field == Some(FieldMarker::End) {
            terminated = true;
            break;
        }
        members.push(id);
        text.push_str(&run.text);
        pos += 1;
    }

    FieldRead::Hyperlink {
        url,
        members,
        text,
        separated,
        terminated,
        resume: pos + 1,
    }
}

fn report(extraction: &mut Extraction, begin: RunId, kind: FieldDiagnosticKind) {
    debug!("incomplete field at run {}: {kind:?}", begin.0);
    extraction.diagnostics.push(FieldDiagnostic { begin, kind });
}
