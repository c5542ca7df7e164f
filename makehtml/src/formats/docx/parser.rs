//! Docx parser: `word/document.xml` body → [`Document`].
//!
//! Only what the HTML conversion looks at is decoded: paragraph styles,
//! list membership, direct bold/italic/underline, run text, field
//! characters and instructions, hyperlink wrappers, and table cell text.
//! Content controls, tracked insertions and smart tags are transparent;
//! deleted text is skipped.

use super::package::{NumberingKinds, Package, StyleNames, DOCUMENT_PART};
use super::xml::{is_wml, wml, wml_attr, wml_bool, wml_name, wml_underline, REL_NS, WML_NS};
use crate::error::ConvertError;
use crate::ir::nodes::{
    Block, Document, FieldMarker, HyperlinkElement, Inline, NumberingRef, Paragraph, Run, Table,
    TableRow,
};
use log::debug;
use roxmltree::Node;

/// Decode a `.docx` package held in memory.
pub fn parse_docx(bytes: &[u8]) -> Result<Document, ConvertError> {
    let mut package = Package::open(bytes)?;
    let xml = package.main_document()?;
    let relationships = package.relationships();
    let styles = package.styles();
    let numbering = package.numbering();

    let doc = roxmltree::Document::parse(&xml).map_err(|err| ConvertError::Xml {
        part: DOCUMENT_PART.to_string(),
        message: err.to_string(),
    })?;
    let body = wml(doc.root_element(), "body")
        .ok_or_else(|| ConvertError::Malformed("missing w:body".to_string()))?;

    let decoder = Decoder {
        styles: &styles,
        numbering: &numbering,
    };
    let mut blocks = Vec::new();
    decoder.blocks(body, &mut blocks);
    debug!(
        "decoded {} blocks, {} relationships",
        blocks.len(),
        relationships.len()
    );

    Ok(Document::new(blocks).with_relationships(relationships))
}

struct Decoder<'s> {
    styles: &'s StyleNames,
    numbering: &'s NumberingKinds,
}

impl Decoder<'_> {
    fn blocks(&self, container: Node, out: &mut Vec<Block>) {
        for node in container.children() {
            match wml_name(node) {
                Some("p") => out.push(Block::Paragraph(self.paragraph(node))),
                Some("tbl") => out.push(Block::Table(self.table(node))),
                Some("sdt") => {
                    if let Some(content) = wml(node, "sdtContent") {
                        self.blocks(content, out);
                    }
                }
                Some("customXml") => self.blocks(node, out),
                _ => {}
            }
        }
    }

    fn paragraph(&self, node: Node) -> Paragraph {
        let properties = wml(node, "pPr");
        let style = self
            .styles
            .resolve(properties.and_then(|ppr| wml_attr(ppr, "pStyle")));

        let mut content = Vec::new();
        inline_content(node, &mut content);

        let paragraph = Paragraph::new(style, content);
        match properties
            .and_then(|ppr| wml(ppr, "numPr"))
            .and_then(|num_pr| self.numbering_ref(num_pr))
        {
            Some(numbering) => paragraph.with_numbering(numbering),
            None => paragraph,
        }
    }

    /// `w:numPr` without a `w:numId` carries no list membership.
    fn numbering_ref(&self, num_pr: Node) -> Option<NumberingRef> {
        let num_id = wml_attr(num_pr, "numId")?;
        let level = wml_attr(num_pr, "ilvl")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(0);
        Some(NumberingRef {
            num_id: num_id.to_string(),
            level,
            kind: self.numbering.kind(num_id, level),
        })
    }

    fn table(&self, node: Node) -> Table {
        let rows = node
            .children()
            .filter(|row| is_wml(*row, "tr"))
            .map(|row| {
                TableRow::new(
                    row.children()
                        .filter(|cell| is_wml(*cell, "tc"))
                        .map(|cell| self.cell_text(cell)),
                )
            })
            .collect();
        Table { rows }
    }

    fn cell_text(&self, cell: Node) -> String {
        cell.children()
            .filter(|p| is_wml(*p, "p"))
            .map(|p| self.paragraph(p).plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn inline_content(container: Node, out: &mut Vec<Inline>) {
    for node in container.children() {
        match wml_name(node) {
            Some("r") => out.push(Inline::Run(run(node))),
            Some("hyperlink") => out.push(Inline::Hyperlink(hyperlink(node))),
            Some("fldSimple") => simple_field(node, out),
            Some("ins") | Some("smartTag") | Some("customXml") => inline_content(node, out),
            Some("sdt") => {
                if let Some(content) = wml(node, "sdtContent") {
                    inline_content(content, out);
                }
            }
            _ => {}
        }
    }
}

/// A `w:fldSimple` is the compact form of a complex field; it is expanded
/// to the begin / instruction / separate / result / end run sequence.
fn simple_field(node: Node, out: &mut Vec<Inline>) {
    out.push(Inline::Run(Run::field(FieldMarker::Begin)));
    if let Some(instruction) = node.attribute((WML_NS, "instr")) {
        out.push(Inline::Run(Run::instruction(instruction)));
    }
    out.push(Inline::Run(Run::field(FieldMarker::Separate)));
    inline_content(node, out);
    out.push(Inline::Run(Run::field(FieldMarker::End)));
}

fn hyperlink(node: Node) -> HyperlinkElement {
    let mut runs = Vec::new();
    wrapped_runs(node, &mut runs);
    let text: String = runs.iter().map(|run| run.text.as_str()).collect();

    HyperlinkElement {
        relationship_id: node.attribute((REL_NS, "id")).map(str::to_string),
        anchor: node.attribute((WML_NS, "anchor")).map(str::to_string),
        text: (!text.is_empty()).then_some(text),
        runs,
    }
}

fn wrapped_runs(container: Node, out: &mut Vec<Run>) {
    for node in container.children() {
        match wml_name(node) {
            Some("r") => out.push(run(node)),
            Some("ins") | Some("smartTag") => wrapped_runs(node, out),
            _ => {}
        }
    }
}

fn run(node: Node) -> Run {
    let mut run = match wml(node, "rPr") {
        Some(rpr) => Run {
            bold: wml_bool(rpr, "b"),
            italic: wml_bool(rpr, "i"),
            underline: wml_underline(rpr),
            ..Default::default()
        },
        None => Run::default(),
    };

    for child in node.children() {
        match wml_name(child) {
            Some("t") => run.text.push_str(child.text().unwrap_or_default()),
            Some("tab") | Some("ptab") => run.text.push('\t'),
            Some("br") => {
                if child
                    .attribute((WML_NS, "type"))
                    .is_none_or(|kind| kind == "textWrapping")
                {
                    run.text.push('\n');
                }
            }
            Some("cr") => run.text.push('\n'),
            Some("noBreakHyphen") => run.text.push('-'),
            Some("fldChar") => {
                run.field = match child.attribute((WML_NS, "fldCharType")) {
                    Some("begin") => Some(FieldMarker::Begin),
                    Some("separate") => Some(FieldMarker::Separate),
                    Some("end") => Some(FieldMarker::End),
                    _ => None,
                };
            }
            Some("instrText") => run
                .instruction
                .get_or_insert_with(String::new)
                .push_str(child.text().unwrap_or_default()),
            _ => {}
        }
    }

    run
}
