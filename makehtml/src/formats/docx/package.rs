//! Package-level parts: the zip container, relationships, style names and
//! numbering kinds.
//!
//! Only `word/document.xml` is mandatory. The auxiliary parts degrade to
//! empty tables when absent or unreadable.

use super::xml::{wml_attr, WML_NS};
use crate::error::ConvertError;
use crate::ir::nodes::{ListKind, Relationships};
use log::{debug, warn};
use std::collections::HashMap;
use std::io::{Cursor, Read};
use zip::result::ZipError;
use zip::ZipArchive;

pub const DOCUMENT_PART: &str = "word/document.xml";
pub const RELATIONSHIPS_PART: &str = "word/_rels/document.xml.rels";
pub const STYLES_PART: &str = "word/styles.xml";
pub const NUMBERING_PART: &str = "word/numbering.xml";

/// An opened `.docx` container.
pub struct Package<'a> {
    zip: ZipArchive<Cursor<&'a [u8]>>,
}

impl<'a> Package<'a> {
    pub fn open(bytes: &'a [u8]) -> Result<Self, ConvertError> {
        let zip = ZipArchive::new(Cursor::new(bytes))?;
        Ok(Self { zip })
    }

    /// Read a part as text; `None` when the container has no such entry.
    pub fn read_part(&mut self, name: &str) -> Result<Option<String>, ConvertError> {
        let mut entry = match self.zip.by_name(name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let mut content = String::new();
        entry.read_to_string(&mut content)?;
        Ok(Some(content))
    }

    pub fn main_document(&mut self) -> Result<String, ConvertError> {
        self.read_part(DOCUMENT_PART)?
            .ok_or_else(|| ConvertError::MissingPart(DOCUMENT_PART.to_string()))
    }

    /// Read an optional part; read and parse failures are logged and
    /// treated as absence.
    fn optional_part(&mut self, name: &str) -> Option<String> {
        match self.read_part(name) {
            Ok(Some(content)) => Some(content),
            Ok(None) => {
                debug!("package has no {name}");
                None
            }
            Err(err) => {
                warn!("ignoring unreadable {name}: {err}");
                None
            }
        }
    }

    pub fn relationships(&mut self) -> Relationships {
        self.optional_part(RELATIONSHIPS_PART)
            .and_then(|xml| parse_optional(RELATIONSHIPS_PART, &xml, parse_relationships))
            .unwrap_or_default()
    }

    pub fn styles(&mut self) -> StyleNames {
        self.optional_part(STYLES_PART)
            .and_then(|xml| parse_optional(STYLES_PART, &xml, parse_styles))
            .unwrap_or_default()
    }

    pub fn numbering(&mut self) -> NumberingKinds {
        self.optional_part(NUMBERING_PART)
            .and_then(|xml| parse_optional(NUMBERING_PART, &xml, parse_numbering))
            .unwrap_or_default()
    }
}

fn parse_optional<T>(
    part: &str,
    xml: &str,
    parse: impl FnOnce(roxmltree::Node) -> T,
) -> Option<T> {
    match roxmltree::Document::parse(xml) {
        Ok(doc) => Some(parse(doc.root_element())),
        Err(err) => {
            warn!("ignoring malformed {part}: {err}");
            None
        }
    }
}

fn parse_relationships(root: roxmltree::Node) -> Relationships {
    root.children()
        .filter(|node| node.tag_name().name() == "Relationship")
        .filter_map(|node| Some((node.attribute("Id")?, node.attribute("Target")?)))
        .collect()
}

/// Style id → display name, from `word/styles.xml`.
#[derive(Debug, Default)]
pub struct StyleNames {
    names: HashMap<String, String>,
}

impl StyleNames {
    /// Display name for a paragraph's `w:pStyle`, or `Normal` without one.
    ///
    /// An id missing from the style table is used as the name.
    pub fn resolve(&self, style_id: Option<&str>) -> String {
        match style_id {
            None => "Normal".to_string(),
            Some(id) => self
                .names
                .get(id)
                .cloned()
                .unwrap_or_else(|| id.to_string()),
        }
    }
}

fn parse_styles(root: roxmltree::Node) -> StyleNames {
    let mut names = HashMap::new();
    for style in root.children() {
        if style.tag_name().name() != "style" || style.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        let Some(id) = style.attribute((WML_NS, "styleId")) else {
            continue;
        };
        if let Some(name) = wml_attr(style, "name") {
            names.insert(id.to_string(), display_name(name));
        }
    }
    StyleNames { names }
}

/// Built-in styles are stored under lowercase names ("heading 1"); Word
/// shows them capitalized.
fn display_name(name: &str) -> String {
    const BUILT_IN: &[&str] = &["heading", "title", "subtitle", "caption", "header", "footer"];

    let first = name.split_whitespace().next().unwrap_or_default();
    if !BUILT_IN.contains(&first) {
        return name.to_string();
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `(numId, ilvl)` → list kind, from `word/numbering.xml`.
#[derive(Debug, Default)]
pub struct NumberingKinds {
    num_to_abstract: HashMap<String, String>,
    formats: HashMap<(String, u32), ListKind>,
}

impl NumberingKinds {
    pub fn kind(&self, num_id: &str, level: u32) -> Option<ListKind> {
        let abstract_id = self.num_to_abstract.get(num_id)?;
        self.formats.get(&(abstract_id.clone(), level)).copied()
    }
}

fn parse_numbering(root: roxmltree::Node) -> NumberingKinds {
    let mut numbering = NumberingKinds::default();

    for node in root.children() {
        if node.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match node.tag_name().name() {
            "abstractNum" => {
                let Some(abstract_id) = node.attribute((WML_NS, "abstractNumId")) else {
                    continue;
                };
                for lvl in node.children() {
                    if lvl.tag_name().name() != "lvl" || lvl.tag_name().namespace() != Some(WML_NS)
                    {
                        continue;
                    }
                    let Some(ilvl) = lvl
                        .attribute((WML_NS, "ilvl"))
                        .and_then(|v| v.parse::<u32>().ok())
                    else {
                        continue;
                    };
                    let kind = match wml_attr(lvl, "numFmt") {
                        Some("bullet") | Some("none") | None => ListKind::Bullet,
                        Some(_) => ListKind::Number,
                    };
                    numbering
                        .formats
                        .insert((abstract_id.to_string(), ilvl), kind);
                }
            }
            "num" => {
                let Some(num_id) = node.attribute((WML_NS, "numId")) else {
                    continue;
                };
                if let Some(abstract_id) = wml_attr(node, "abstractNumId") {
                    numbering
                        .num_to_abstract
                        .insert(num_id.to_string(), abstract_id.to_string());
                }
            }
            _ => {}
        }
    }

    numbering
}
