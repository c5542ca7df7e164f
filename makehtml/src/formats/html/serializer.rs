//! HTML serialization (Document → HTML)
//!
//! Pipeline: blocks → dispatcher fragments → newline-joined body → post-passes.
//!
//! The dispatcher is a two-state machine. List paragraphs are buffered
//! (`AccumulatingList`) because their nesting is only known once the run of
//! list paragraphs ends; any other block, or the end of the document,
//! flushes the buffer through the list builder first.

use crate::common::escape::escape_html;
use crate::common::hyperlinks::extract_hyperlinks;
use crate::common::lists::build_list;
use crate::common::postprocess::apply_post_passes;
use crate::common::runs::consolidate_runs;
use crate::common::tables::render_table;
use crate::formats::html::formatting_rules::FormattingRules;
use crate::ir::nodes::{Block, Document, ListItem, ListKind, Paragraph, Relationships, Table};
use log::debug;

/// Serialize a document to HTML under `rules`.
pub fn serialize_to_html(doc: &Document, rules: &FormattingRules) -> String {
    let body = render_blocks(doc, rules);
    apply_post_passes(&body, &rules.special_characters, &rules.replacements)
}

/// Render the blocks without the post-passes.
pub fn render_blocks(doc: &Document, rules: &FormattingRules) -> String {
    let mut dispatcher = Dispatcher::new(rules, &doc.relationships);
    for block in &doc.blocks {
        match block {
            Block::Paragraph(paragraph) => dispatcher.paragraph(paragraph),
            Block::Table(table) => dispatcher.table(table),
        }
    }
    dispatcher.finish()
}

/// Inline HTML for one paragraph: hyperlinks extracted, runs consolidated.
pub fn render_inline(paragraph: &Paragraph, relationships: &Relationships) -> String {
    let links = extract_hyperlinks(paragraph, relationships);
    consolidate_runs(paragraph, &links)
}

#[derive(Debug, Default)]
enum DispatchState {
    #[default]
    Idle,
    AccumulatingList(Vec<ListItem>),
}

struct Dispatcher<'a> {
    rules: &'a FormattingRules,
    relationships: &'a Relationships,
    fragments: Vec<String>,
    state: DispatchState,
}

impl<'a> Dispatcher<'a> {
    fn new(rules: &'a FormattingRules, relationships: &'a Relationships) -> Self {
        Self {
            rules,
            relationships,
            fragments: Vec::new(),
            state: DispatchState::Idle,
        }
    }

    fn paragraph(&mut self, paragraph: &Paragraph) {
        if let Some((level, kind)) = classify_list_item(paragraph) {
            let item = ListItem::new(level, kind, render_inline(paragraph, self.relationships));
            match &mut self.state {
                DispatchState::AccumulatingList(items) => items.push(item),
                DispatchState::Idle => self.state = DispatchState::AccumulatingList(vec![item]),
            }
            return;
        }

        self.flush_list();
        if let Some(html) = self.render_paragraph(paragraph) {
            self.fragments.push(html);
        }
    }

    fn table(&mut self, table: &Table) {
        self.flush_list();
        let html = render_table(table);
        if !html.is_empty() {
            self.fragments.push(html);
        }
    }

    fn flush_list(&mut self) {
        if let DispatchState::AccumulatingList(items) = std::mem::take(&mut self.state) {
            debug!("flushing list of {} items", items.len());
            self.fragments.push(build_list(&items));
        }
    }

    fn finish(mut self) -> String {
        self.flush_list();
        self.fragments.join("\n")
    }

    fn render_paragraph(&self, paragraph: &Paragraph) -> Option<String> {
        let text = paragraph.plain_text();
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if is_heading(paragraph) {
            let tag = &self.rules.heading_tag;
            return Some(format!("<{tag}>{}</{tag}>", escape_html(text)));
        }

        let tag = &self.rules.paragraph_tag;
        let inline = render_inline(paragraph, self.relationships);
        let html = format!("<{tag}>{inline}</{tag}>");

        if self.rules.quote_detection.should_wrap(text) {
            let (open, close) = self.rules.quote_detection.wrap_tags();
            return Some(format!("{open}{html}{close}"));
        }
        Some(html)
    }
}

fn is_heading(paragraph: &Paragraph) -> bool {
    paragraph.style.starts_with("Heading")
}

/// Level and kind of a list paragraph, or `None` for anything else.
///
/// Numbering properties win; otherwise the `List Bullet N` / `List Number N`
/// style convention applies, where `N` is the 1-based level.
pub fn classify_list_item(paragraph: &Paragraph) -> Option<(u32, ListKind)> {
    if let Some(numbering) = &paragraph.numbering {
        return Some((
            numbering.level,
            numbering.kind.unwrap_or(ListKind::Bullet),
        ));
    }

    let style = paragraph.style.to_lowercase();
    let kind = if style.contains("list bullet") {
        ListKind::Bullet
    } else if style.contains("list number") {
        ListKind::Number
    } else {
        return None;
    };
    Some((style_level(&paragraph.style), kind))
}

fn style_level(style: &str) -> u32 {
    let prefix = style.trim_end_matches(|c: char| c.is_ascii_digit());
    style[prefix.len()..]
        .parse::<u32>()
        .map(|n| n.saturating_sub(1))
        .unwrap_or(0)
}
