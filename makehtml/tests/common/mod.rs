//! Builds `.docx` packages in memory for integration tests.

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const NAMESPACES: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships""#;

#[derive(Default)]
pub struct DocxBuilder {
    body: String,
    relationships: Vec<(String, String)>,
    styles: Vec<(String, String)>,
    numbering: Option<String>,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends raw body XML (`w:p`, `w:tbl`, ...).
    pub fn block(mut self, xml: impl AsRef<str>) -> Self {
        self.body.push_str(xml.as_ref());
        self
    }

    pub fn relationship(mut self, id: &str, target: &str) -> Self {
        self.relationships.push((id.to_string(), target.to_string()));
        self
    }

    pub fn style(mut self, id: &str, name: &str) -> Self {
        self.styles.push((id.to_string(), name.to_string()));
        self
    }

    /// Raw children of `w:numbering`.
    pub fn numbering(mut self, xml: &str) -> Self {
        self.numbering = Some(xml.to_string());
        self
    }

    pub fn document_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document {NAMESPACES}><w:body>{}</w:body></w:document>"#,
            self.body
        )
    }

    pub fn build(&self) -> Vec<u8> {
        let mut parts = vec![("word/document.xml".to_string(), self.document_xml())];

        if !self.relationships.is_empty() {
            let rels: String = self
                .relationships
                .iter()
                .map(|(id, target)| {
                    format!(
                        r#"<Relationship Id="{id}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="{target}" TargetMode="External"/>"#
                    )
                })
                .collect();
            parts.push((
                "word/_rels/document.xml.rels".to_string(),
                format!(
                    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels}</Relationships>"#
                ),
            ));
        }

        if !self.styles.is_empty() {
            let styles: String = self
                .styles
                .iter()
                .map(|(id, name)| {
                    format!(
                        r#"<w:style w:type="paragraph" w:styleId="{id}"><w:name w:val="{name}"/></w:style>"#
                    )
                })
                .collect();
            parts.push((
                "word/styles.xml".to_string(),
                format!("<w:styles {NAMESPACES}>{styles}</w:styles>"),
            ));
        }

        if let Some(numbering) = &self.numbering {
            parts.push((
                "word/numbering.xml".to_string(),
                format!("<w:numbering {NAMESPACES}>{numbering}</w:numbering>"),
            ));
        }

        package(&parts)
    }
}

/// Zips `(name, content)` parts.
pub fn package(parts: &[(String, String)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in parts {
        zip.start_file(name.as_str(), SimpleFileOptions::default())
            .unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// `w:p` with an optional style id and raw inline content.
pub fn p(style: Option<&str>, inline: &str) -> String {
    let ppr = style
        .map(|id| format!(r#"<w:pPr><w:pStyle w:val="{id}"/></w:pPr>"#))
        .unwrap_or_default();
    format!("<w:p>{ppr}{inline}</w:p>")
}

/// `w:p` carrying list numbering.
pub fn list_p(num_id: u32, level: u32, inline: &str) -> String {
    format!(
        r#"<w:p><w:pPr><w:numPr><w:ilvl w:val="{level}"/><w:numId w:val="{num_id}"/></w:numPr></w:pPr>{inline}</w:p>"#
    )
}

/// Plain run.
pub fn r(text: &str) -> String {
    format!(r#"<w:r><w:t xml:space="preserve">{text}</w:t></w:r>"#)
}

/// Run with raw `w:rPr` children, e.g. `"<w:b/>"`.
pub fn r_fmt(props: &str, text: &str) -> String {
    format!(r#"<w:r><w:rPr>{props}</w:rPr><w:t xml:space="preserve">{text}</w:t></w:r>"#)
}

/// A complete `HYPERLINK` field whose result is `text`.
pub fn field_link(url: &str, text: &str) -> String {
    format!(
        r#"<w:r><w:fldChar w:fldCharType="begin"/></w:r><w:r><w:instrText xml:space="preserve"> HYPERLINK "{url}" </w:instrText></w:r><w:r><w:fldChar w:fldCharType="separate"/></w:r>{}<w:r><w:fldChar w:fldCharType="end"/></w:r>"#,
        r(text)
    )
}

/// A two-level list definition: bullets at level 0, decimals at level 1,
/// bound to `w:numId` 1; and an all-decimal one bound to 2.
pub const NUMBERING: &str = r#"<w:abstractNum w:abstractNumId="0"><w:lvl w:ilvl="0"><w:numFmt w:val="bullet"/></w:lvl><w:lvl w:ilvl="1"><w:numFmt w:val="decimal"/></w:lvl></w:abstractNum><w:abstractNum w:abstractNumId="1"><w:lvl w:ilvl="0"><w:numFmt w:val="decimal"/></w:lvl></w:abstractNum><w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num><w:num w:numId="2"><w:abstractNumId w:val="1"/></w:num>"#;

/// A table of plain-text cells.
pub fn table(rows: &[&[&str]]) -> String {
    let rows: String = rows
        .iter()
        .map(|cells| {
            let cells: String = cells
                .iter()
                .map(|cell| format!("<w:tc>{}</w:tc>", p(None, &r(cell))))
                .collect();
            format!("<w:tr>{cells}</w:tr>")
        })
        .collect();
    format!("<w:tbl>{rows}</w:tbl>")
}
