//! Content Node Model
//!
//! Read-only view of one stat block's marked-up text: the name heading,
//! paragraphs split into emphasis runs, and the ability-score table.
//!
//! Source formats (Markdown, HTML exports, ...) are resolved into this model
//! once, at the boundary. The extractors in [`crate::ingestion::stat_block`]
//! never probe the source format themselves.

use serde::{Deserialize, Serialize};

// ============================================================================
// Runs and Paragraphs
// ============================================================================

/// Emphasis applied to a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    Plain,
    Bold,
    Italic,
    /// Italic run with a nested bold run, used for trait headers
    /// (`***Spellcasting.***`).
    BoldItalic,
}

impl Emphasis {
    /// Whether the run carries a bold marker (directly or nested).
    pub fn is_bold(self) -> bool {
        matches!(self, Emphasis::Bold | Emphasis::BoldItalic)
    }
}

/// A contiguous piece of text with a single emphasis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub emphasis: Emphasis,
    pub text: String,
}

impl Run {
    pub fn new(emphasis: Emphasis, text: impl Into<String>) -> Self {
        Self {
            emphasis,
            text: text.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(Emphasis::Plain, text)
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(Emphasis::Bold, text)
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self::new(Emphasis::Italic, text)
    }

    pub fn bold_italic(text: impl Into<String>) -> Self {
        Self::new(Emphasis::BoldItalic, text)
    }
}

/// One block of the stat block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new(runs: Vec<Run>) -> Self {
        Self { runs }
    }

    /// Concatenated text of every run.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// The first run that is not pure whitespace.
    pub fn leading_run(&self) -> Option<&Run> {
        self.runs.iter().find(|r| !r.text.trim().is_empty())
    }

    /// Text of every run after the leading one.
    pub fn text_after_leading(&self) -> String {
        let leading = self.runs.iter().position(|r| !r.text.trim().is_empty());
        match leading {
            Some(idx) => self.runs[idx + 1..].iter().map(|r| r.text.as_str()).collect(),
            None => String::new(),
        }
    }

    /// Number of runs that carry content.
    pub fn content_run_count(&self) -> usize {
        self.runs.iter().filter(|r| !r.text.trim().is_empty()).count()
    }
}

// ============================================================================
// Heading and Table
// ============================================================================

/// Heading levels a stat block name can be written at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingLevel {
    H3,
    H4,
    H5,
}

/// The stat block's name heading, resolved once by the adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: HeadingLevel,
    pub text: String,
}

/// Two-row table: row 0 holds headers, row 1 holds `{score}({modifier})`
/// cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }
}

// ============================================================================
// Content Node
// ============================================================================

/// One stat block, ready for field extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentNode {
    pub heading: Option<Heading>,
    pub paragraphs: Vec<Paragraph>,
    pub table: Option<Table>,
}

impl ContentNode {
    pub fn builder() -> ContentNodeBuilder {
        ContentNodeBuilder::default()
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn paragraph(&self, index: usize) -> Option<&Paragraph> {
        self.paragraphs.get(index)
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub fn heading_text(&self) -> Option<&str> {
        self.heading.as_ref().map(|h| h.text.as_str())
    }
}

/// Incremental construction of a [`ContentNode`].
#[derive(Debug, Default)]
pub struct ContentNodeBuilder {
    node: ContentNode,
}

impl ContentNodeBuilder {
    pub fn heading(mut self, level: HeadingLevel, text: impl Into<String>) -> Self {
        self.node.heading = Some(Heading {
            level,
            text: text.into(),
        });
        self
    }

    pub fn paragraph(mut self, runs: Vec<Run>) -> Self {
        self.node.paragraphs.push(Paragraph::new(runs));
        self
    }

    /// Shorthand for a paragraph with a single plain run.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.paragraph(vec![Run::plain(text)])
    }

    /// Shorthand for `**label** value`.
    pub fn labeled(self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.paragraph(vec![Run::bold(label), Run::plain(value)])
    }

    pub fn table(mut self, headers: &[&str], cells: &[&str]) -> Self {
        self.node.table = Some(Table {
            rows: vec![
                headers.iter().map(|s| s.to_string()).collect(),
                cells.iter().map(|s| s.to_string()).collect(),
            ],
        });
        self
    }

    pub fn build(self) -> ContentNode {
        self.node
    }
}
