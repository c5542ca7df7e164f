//! Core data structures for the decoded document.

use std::collections::HashMap;

/// A decoded Word document: its body blocks plus the relationship table
/// used to resolve explicit hyperlinks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub blocks: Vec<Block>,
    pub relationships: Relationships,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            relationships: Relationships::default(),
        }
    }

    pub fn with_relationships(mut self, relationships: Relationships) -> Self {
        self.relationships = relationships;
        self
    }
}

/// Relationship id → target lookup (`word/_rels/document.xml.rels`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Relationships {
    targets: HashMap<String, String>,
}

impl Relationships {
    pub fn insert(&mut self, id: impl Into<String>, target: impl Into<String>) {
        self.targets.insert(id.into(), target.into());
    }

    pub fn resolve(&self, id: &str) -> Option<&str> {
        self.targets.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Relationships {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut rels = Relationships::default();
        for (id, target) in iter {
            rels.insert(id, target);
        }
        rels
    }
}

/// A top-level body element.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

/// Represents a paragraph: a style, inline content and optional list membership.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    /// Display name of the paragraph style (e.g. "Heading 1", "List Bullet 2").
    pub style: String,
    pub content: Vec<Inline>,
    pub numbering: Option<NumberingRef>,
}

impl Paragraph {
    pub fn new(style: impl Into<String>, content: Vec<Inline>) -> Self {
        Self {
            style: style.into(),
            content,
            numbering: None,
        }
    }

    pub fn with_numbering(mut self, numbering: NumberingRef) -> Self {
        self.numbering = Some(numbering);
        self
    }

    /// All runs in document order, including runs nested inside hyperlink
    /// wrappers. The position in this sequence is the run's [`RunId`].
    pub fn runs(&self) -> impl Iterator<Item = (RunId, &Run)> + '_ {
        self.content
            .iter()
            .flat_map(|inline| match inline {
                Inline::Run(run) => std::slice::from_ref(run).iter(),
                Inline::Hyperlink(link) => link.runs.iter(),
            })
            .enumerate()
            .map(|(idx, run)| (RunId(idx), run))
    }

    /// Concatenated text of every run.
    pub fn plain_text(&self) -> String {
        self.runs().map(|(_, run)| run.text.as_str()).collect()
    }
}

/// Position of a run in its paragraph's flattened run sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(pub usize);

/// Inline paragraph content.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Run(Run),
    Hyperlink(HyperlinkElement),
}

/// The minimal inline unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// `w:fldChar` carried by this run, if any.
    pub field: Option<FieldMarker>,
    /// `w:instrText` carried by this run, if any.
    pub instruction: Option<String>,
}

impl Run {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn field(marker: FieldMarker) -> Self {
        Self {
            field: Some(marker),
            ..Default::default()
        }
    }

    pub fn instruction(instruction: impl Into<String>) -> Self {
        Self {
            instruction: Some(instruction.into()),
            ..Default::default()
        }
    }
}

/// Field character types (`w:fldCharType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMarker {
    Begin,
    Separate,
    End,
}

/// An explicit `w:hyperlink` wrapper.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HyperlinkElement {
    /// Relationship id (`r:id`) pointing at an external target.
    pub relationship_id: Option<String>,
    /// Internal bookmark (`w:anchor`).
    pub anchor: Option<String>,
    /// Display text of the wrapper; the decoder fills it with its runs' text.
    pub text: Option<String>,
    pub runs: Vec<Run>,
}

/// List membership from `w:numPr`.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberingRef {
    pub num_id: String,
    pub level: u32,
    /// Resolved from `word/numbering.xml` when the decoder could do so.
    pub kind: Option<ListKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Number,
}

impl ListKind {
    pub fn tag(self) -> &'static str {
        match self {
            ListKind::Bullet => "ul",
            ListKind::Number => "ol",
        }
    }
}

/// A collected list paragraph, ready for nesting.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub level: u32,
    pub kind: ListKind,
    /// Already rendered inline HTML.
    pub text: String,
}

impl ListItem {
    pub fn new(level: u32, kind: ListKind, text: impl Into<String>) -> Self {
        Self {
            level,
            kind,
            text: text.into(),
        }
    }
}

/// Represents a table of flattened text cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

/// Represents a table row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRow {
    pub cells: Vec<String>,
}

impl TableRow {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }
}
