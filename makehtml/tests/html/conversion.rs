//! End-to-end conversions (docx bytes → HTML).

use crate::common::{field_link, list_p, p, r, r_fmt, table, DocxBuilder, NUMBERING};
use insta::assert_snapshot;
use makehtml::formats::html::{CharacterRule, FormattingRules, ReplacementRule};
use makehtml::format::Format;
use makehtml::formats::{DocxFormat, HtmlFormat};
use makehtml::{convert_docx, convert_docx_file};

fn to_html(builder: DocxBuilder) -> String {
    convert_docx(&builder.build(), &FormattingRules::default()).unwrap()
}

fn to_html_with(builder: DocxBuilder, rules: &FormattingRules) -> String {
    convert_docx(&builder.build(), rules).unwrap()
}

#[test]
fn test_kitchensink() {
    let builder = DocxBuilder::new()
        .style("Heading1", "heading 1")
        .numbering(NUMBERING)
        .relationship("rId10", "https://example.com")
        .block(p(Some("Heading1"), &r("Report &amp; Summary")))
        .block(p(
            None,
            &format!(
                r#"{}<w:hyperlink r:id="rId10">{}</w:hyperlink>{}"#,
                r("Visit "),
                r_fmt("<w:b/>", "our site"),
                r(".")
            ),
        ))
        .block(list_p(1, 0, &r("First")))
        .block(list_p(1, 1, &r("Sub a")))
        .block(list_p(1, 1, &r("Sub b")))
        .block(list_p(1, 0, &r("Second")))
        .block(table(&[&["Name", "Qty"], &["Apples", "3"]]))
        .block(p(None, ""))
        .block(p(None, &field_link("http://y", "Go")));

    assert_snapshot!(to_html(builder), @r###"
    <h3>Report &amp; Summary</h3>
    <p>Visit <a href="https://example.com"><strong>our site</strong></a>.</p>
    <ul>
      <li>First
        <ol>
          <li>Sub a</li>
          <li>Sub b</li>
        </ol>
      </li>
      <li>Second</li>
    </ul>
    <table>
      <thead>
        <tr>
          <th>Name</th>
          <th>Qty</th>
        </tr>
      </thead>
      <tbody>
        <tr>
          <td>Apples</td>
          <td>3</td>
        </tr>
      </tbody>
    </table>
    <p><a href="http://y">Go</a></p>
    "###);
}

#[test]
fn test_split_runs_merge() {
    let builder = DocxBuilder::new().block(p(
        None,
        &format!(
            "{}{}{}",
            r_fmt("<w:b/>", "Hello "),
            r_fmt("<w:b/>", "World"),
            r_fmt("<w:i/><w:u w:val=\"single\"/>", "!")
        ),
    ));
    assert_eq!(
        to_html(builder),
        "<p><strong>Hello World</strong><em><u>!</u></em></p>"
    );
}

#[test]
fn test_anchor_link() {
    let builder = DocxBuilder::new().block(p(
        None,
        &format!(r#"<w:hyperlink w:anchor="intro">{}</w:hyperlink>"#, r("Intro")),
    ));
    assert_eq!(to_html(builder), r##"<p><a href="#intro">Intro</a></p>"##);
}

#[test]
fn test_empty_bookmark_link_is_not_rendered() {
    let builder = DocxBuilder::new().block(p(
        None,
        &format!(r#"{}<w:hyperlink w:anchor="_top"/>"#, r("Text")),
    ));
    assert_eq!(to_html(builder), "<p>Text</p>");
}

#[test]
fn test_unknown_relationship_drops_link_keeps_text() {
    let builder = DocxBuilder::new().block(p(
        None,
        &format!(r#"<w:hyperlink r:id="rId99">{}</w:hyperlink>"#, r("text")),
    ));
    assert_eq!(to_html(builder), "<p>text</p>");
}

#[test]
fn test_list_styles_without_numbering() {
    let builder = DocxBuilder::new()
        .style("ListNumber", "List Number")
        .style("ListNumber2", "List Number 2")
        .block(p(Some("ListNumber"), &r("one")))
        .block(p(Some("ListNumber2"), &r("one.a")))
        .block(p(None, &r("after")));
    assert_snapshot!(to_html(builder), @r###"
    <ol>
      <li>one
        <ol>
          <li>one.a</li>
        </ol>
      </li>
    </ol>
    <p>after</p>
    "###);
}

#[test]
fn test_numbering_without_definitions_defaults_to_bullets() {
    let builder = DocxBuilder::new()
        .block(list_p(5, 0, &r("x")))
        .block(list_p(5, 0, &r("y")));
    assert_eq!(
        to_html(builder),
        "<ul>\n  <li>x</li>\n  <li>y</li>\n</ul>"
    );
}

#[test]
fn test_kind_switch_between_lists() {
    let builder = DocxBuilder::new()
        .numbering(NUMBERING)
        .block(list_p(1, 0, &r("bullet")))
        .block(list_p(2, 0, &r("number")));
    assert_eq!(
        to_html(builder),
        "<ul>\n  <li>bullet</li>\n</ul>\n<ol>\n  <li>number</li>\n</ol>"
    );
}

#[test]
fn test_quote_detection_and_post_passes() {
    let rules = FormattingRules {
        heading_tag: "h2".to_string(),
        special_characters: vec![CharacterRule::new("©", "sup")],
        replacements: vec![ReplacementRule::new("acme", "ACME").case_insensitive()],
        quote_detection: makehtml::formats::html::QuoteDetection {
            enabled: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let builder = DocxBuilder::new()
        .style("Heading2", "heading 2")
        .block(p(Some("Heading2"), &r("Acme© news")))
        .block(p(None, &r("\u{201C}One\u{201D} and \u{201C}two\u{201D}")))
        .block(p(None, &r("\"only\" two")));

    assert_snapshot!(to_html_with(builder, &rules), @r###"
    <h2>ACME<sup>©</sup> news</h2>
    <div class="blockquote"><p>“One” and “two”</p></div>
    <p>&quot;only&quot; two</p>
    "###);
}

#[test]
fn test_heading_ignores_inline_formatting() {
    let builder = DocxBuilder::new()
        .style("Heading1", "heading 1")
        .block(p(Some("Heading1"), &r_fmt("<w:b/>", "Bold title")));
    assert_eq!(to_html(builder), "<h3>Bold title</h3>");
}

#[test]
fn test_convert_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.docx");
    std::fs::write(&path, DocxBuilder::new().block(p(None, &r("file"))).build()).unwrap();

    let html = convert_docx_file(&path, &FormattingRules::default()).unwrap();

    assert_eq!(html, "<p>file</p>");
}

#[test]
fn test_html_format_serializes_with_its_rules() {
    let rules = FormattingRules {
        paragraph_tag: "div".to_string(),
        ..Default::default()
    };
    let format = HtmlFormat::new(rules);
    let doc = DocxFormat
        .parse(&DocxBuilder::new().block(p(None, &r("body"))).build())
        .unwrap();

    assert!(format.supports_serialization());
    assert!(!format.supports_parsing());
    assert_eq!(format.serialize(&doc).unwrap(), "<div>body</div>");
    assert!(format.parse(b"<p>x</p>").is_err());
}

#[test]
fn test_empty_document() {
    assert_eq!(to_html(DocxBuilder::new()), "");
}
