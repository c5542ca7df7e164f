//! Decoding tests for `.docx` packages (bytes → IR).

use crate::common::{list_p, p, package, r, r_fmt, table, DocxBuilder, NUMBERING};
use makehtml::format::Format;
use makehtml::formats::DocxFormat;
use makehtml::ir::nodes::{Block, Inline, ListKind};
use makehtml::ConvertError;

#[test]
fn test_styles_resolve_to_display_names() {
    let bytes = DocxBuilder::new()
        .style("Heading1", "heading 1")
        .style("ListBullet", "List Bullet")
        .block(p(Some("Heading1"), &r("Title")))
        .block(p(Some("ListBullet"), &r("item")))
        .block(p(None, &r("body")))
        .build();

    let doc = DocxFormat.parse(&bytes).unwrap();

    let styles: Vec<&str> = doc
        .blocks
        .iter()
        .map(|block| match block {
            Block::Paragraph(p) => p.style.as_str(),
            Block::Table(_) => "<table>",
        })
        .collect();
    assert_eq!(styles, vec!["Heading 1", "List Bullet", "Normal"]);
}

#[test]
fn test_numbering_kinds_are_resolved() {
    let bytes = DocxBuilder::new()
        .numbering(NUMBERING)
        .block(list_p(1, 0, &r("a")))
        .block(list_p(1, 1, &r("b")))
        .block(list_p(9, 0, &r("unknown")))
        .build();

    let doc = DocxFormat.parse(&bytes).unwrap();

    let kinds: Vec<Option<ListKind>> = doc
        .blocks
        .iter()
        .filter_map(|block| match block {
            Block::Paragraph(p) => p.numbering.as_ref().map(|n| n.kind),
            Block::Table(_) => None,
        })
        .collect();
    assert_eq!(
        kinds,
        vec![Some(ListKind::Bullet), Some(ListKind::Number), None]
    );
}

#[test]
fn test_relationships_and_wrappers() {
    let bytes = DocxBuilder::new()
        .relationship("rId7", "https://example.com/docs")
        .block(p(
            None,
            &format!(r#"<w:hyperlink r:id="rId7">{}</w:hyperlink>"#, r_fmt("<w:b/>", "docs")),
        ))
        .build();

    let doc = DocxFormat.parse(&bytes).unwrap();

    assert_eq!(doc.relationships.resolve("rId7"), Some("https://example.com/docs"));
    let Block::Paragraph(paragraph) = &doc.blocks[0] else {
        panic!("expected paragraph");
    };
    let Inline::Hyperlink(link) = &paragraph.content[0] else {
        panic!("expected hyperlink");
    };
    assert_eq!(link.relationship_id.as_deref(), Some("rId7"));
    assert!(link.runs[0].bold);
}

#[test]
fn test_table_cells_join_paragraphs() {
    let cell = format!("<w:tc>{}{}</w:tc>", p(None, &r("one")), p(None, &r("two")));
    let bytes = DocxBuilder::new()
        .block(format!("<w:tbl><w:tr>{cell}</w:tr></w:tbl>"))
        .block(table(&[&["h1", "h2"], &["a", "b"]]))
        .build();

    let doc = DocxFormat.parse(&bytes).unwrap();

    let Block::Table(first) = &doc.blocks[0] else {
        panic!("expected table");
    };
    assert_eq!(first.rows[0].cells, vec!["one\ntwo".to_string()]);
    let Block::Table(second) = &doc.blocks[1] else {
        panic!("expected table");
    };
    assert_eq!(second.rows.len(), 2);
    assert_eq!(second.rows[1].cells, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn test_content_controls_are_transparent() {
    let bytes = DocxBuilder::new()
        .block(format!(
            "<w:sdt><w:sdtPr/><w:sdtContent>{}</w:sdtContent></w:sdt>",
            p(None, &r("inside"))
        ))
        .build();

    let doc = DocxFormat.parse(&bytes).unwrap();

    assert_eq!(doc.blocks.len(), 1);
}

#[test]
fn test_not_a_zip_is_a_container_error() {
    let err = DocxFormat.parse(b"plain text").unwrap_err();
    assert!(matches!(err, ConvertError::Container(_)), "{err:?}");
}

#[test]
fn test_missing_document_part() {
    let bytes = package(&[("docProps/core.xml".to_string(), "<x/>".to_string())]);
    let err = DocxFormat.parse(&bytes).unwrap_err();
    assert!(matches!(err, ConvertError::MissingPart(ref part) if part == "word/document.xml"));
}

#[test]
fn test_malformed_document_xml() {
    let bytes = package(&[("word/document.xml".to_string(), "<w:document>".to_string())]);
    let err = DocxFormat.parse(&bytes).unwrap_err();
    assert!(matches!(err, ConvertError::Xml { .. }), "{err:?}");
}

#[test]
fn test_malformed_optional_parts_are_ignored() {
    let builder = DocxBuilder::new().block(p(Some("Heading1"), &r("Title")));
    let bytes = package(&[
        ("word/document.xml".to_string(), builder.document_xml()),
        ("word/styles.xml".to_string(), "<broken".to_string()),
    ]);

    let doc = DocxFormat.parse(&bytes).unwrap();

    let Block::Paragraph(paragraph) = &doc.blocks[0] else {
        panic!("expected paragraph");
    };
    assert_eq!(paragraph.style, "Heading1");
}

#[test]
fn test_matches_path() {
    use std::path::Path;
    assert!(DocxFormat.matches_path(Path::new("report.docx")));
    assert!(DocxFormat.matches_path(Path::new("REPORT.DocX")));
    assert!(!DocxFormat.matches_path(Path::new("report.doc")));
    assert!(!DocxFormat.matches_path(Path::new("docx")));
}
