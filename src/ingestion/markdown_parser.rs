//! Markdown Stat Block Adapter
//!
//! Resolves a Markdown rendering of one stat block into a [`ContentNode`].
//!
//! - The name heading is the first level-3 heading, else the first level-4,
//!   else the first level-5 heading. Content before it is dropped.
//! - Any other heading after the name becomes a paragraph holding a single
//!   bold run, so section titles (`#### Actions`) behave like bold labels.
//! - Paragraph text is grouped into runs by emphasis. `***x***` yields a
//!   [`Emphasis::BoldItalic`] run.
//! - The first table supplies the ability-score rows.

use pulldown_cmark::{Event, HeadingLevel as MdHeadingLevel, Options, Parser, Tag, TagEnd};

use super::content_node::{ContentNode, Emphasis, Heading, HeadingLevel, Paragraph, Run, Table};

/// Blocks collected in document order before the name heading is resolved.
#[derive(Debug)]
enum Block {
    Heading(MdHeadingLevel, String),
    Paragraph(Vec<Run>),
    Table(Vec<Vec<String>>),
}

/// Markdown → [`ContentNode`] adapter.
pub struct MarkdownStatBlockParser;

impl MarkdownStatBlockParser {
    /// Parse Markdown text into a content node.
    pub fn parse(markdown: &str) -> ContentNode {
        let blocks = collect_blocks(markdown);
        assemble(blocks)
    }
}

impl ContentNode {
    /// Build a node from the Markdown rendering of one stat block.
    pub fn from_markdown(markdown: &str) -> Self {
        MarkdownStatBlockParser::parse(markdown)
    }
}

// ============================================================================
// Event Walk
// ============================================================================

#[derive(Default)]
struct RunBuilder {
    runs: Vec<Run>,
    bold: usize,
    italic: usize,
}

impl RunBuilder {
    fn emphasis(&self) -> Emphasis {
        match (self.bold > 0, self.italic > 0) {
            (true, true) => Emphasis::BoldItalic,
            (true, false) => Emphasis::Bold,
            (false, true) => Emphasis::Italic,
            (false, false) => Emphasis::Plain,
        }
    }

    fn push(&mut self, text: &str) {
        let emphasis = self.emphasis();
        match self.runs.last_mut() {
            Some(last) if last.emphasis == emphasis => last.text.push_str(text),
            _ => self.runs.push(Run::new(emphasis, text)),
        }
    }

    fn finish(&mut self) -> Vec<Run> {
        self.bold = 0;
        self.italic = 0;
        std::mem::take(&mut self.runs)
    }
}

fn collect_blocks(markdown: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut runs = RunBuilder::default();
    let mut heading: Option<MdHeadingLevel> = None;
    let mut in_paragraph = false;

    let mut table: Option<Vec<Vec<String>>> = None;
    let mut row: Vec<String> = Vec::new();
    let mut cell: Option<String> = None;

    for event in Parser::new_ext(markdown, Options::ENABLE_TABLES) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => heading = Some(level),
            Event::End(TagEnd::Heading(_)) => {
                let text: String = runs.finish().into_iter().map(|r| r.text).collect();
                if let Some(level) = heading.take() {
                    blocks.push(Block::Heading(level, text));
                }
            }
            Event::Start(Tag::Paragraph) => in_paragraph = true,
            Event::End(TagEnd::Paragraph) => {
                in_paragraph = false;
                let paragraph = runs.finish();
                if !paragraph.is_empty() {
                    blocks.push(Block::Paragraph(paragraph));
                }
            }
            Event::Start(Tag::Strong) => runs.bold += 1,
            Event::End(TagEnd::Strong) => runs.bold = runs.bold.saturating_sub(1),
            Event::Start(Tag::Emphasis) => runs.italic += 1,
            Event::End(TagEnd::Emphasis) => runs.italic = runs.italic.saturating_sub(1),
            Event::Start(Tag::Table(_)) => table = Some(Vec::new()),
            Event::End(TagEnd::Table) => {
                if let Some(rows) = table.take() {
                    blocks.push(Block::Table(rows));
                }
            }
            Event::Start(Tag::TableHead) | Event::Start(Tag::TableRow) => row.clear(),
            Event::End(TagEnd::TableHead) | Event::End(TagEnd::TableRow) => {
                if let Some(rows) = table.as_mut() {
                    rows.push(std::mem::take(&mut row));
                }
            }
            Event::Start(Tag::TableCell) => cell = Some(String::new()),
            Event::End(TagEnd::TableCell) => {
                if let Some(text) = cell.take() {
                    row.push(text.trim().to_string());
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(cell) = cell.as_mut() {
                    cell.push_str(&text);
                } else if in_paragraph || heading.is_some() {
                    runs.push(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(cell) = cell.as_mut() {
                    cell.push(' ');
                } else if in_paragraph || heading.is_some() {
                    runs.push("\n");
                }
            }
            _ => {}
        }
    }

    blocks
}

// ============================================================================
// Assembly
// ============================================================================

fn to_level(level: MdHeadingLevel) -> Option<HeadingLevel> {
    match level {
        MdHeadingLevel::H3 => Some(HeadingLevel::H3),
        MdHeadingLevel::H4 => Some(HeadingLevel::H4),
        MdHeadingLevel::H5 => Some(HeadingLevel::H5),
        _ => None,
    }
}

fn find_name_heading(blocks: &[Block]) -> Option<usize> {
    [MdHeadingLevel::H3, MdHeadingLevel::H4, MdHeadingLevel::H5]
        .into_iter()
        .find_map(|wanted| {
            blocks
                .iter()
                .position(|b| matches!(b, Block::Heading(level, _) if *level == wanted))
        })
}

fn assemble(blocks: Vec<Block>) -> ContentNode {
    let name_index = find_name_heading(&blocks);
    let mut node = ContentNode::default();

    for (index, block) in blocks.into_iter().enumerate() {
        if name_index.is_some_and(|name| index < name) {
            continue;
        }
        match block {
            Block::Heading(level, text) if Some(index) == name_index => {
                if let Some(level) = to_level(level) {
                    node.heading = Some(Heading {
                        level,
                        text: text.replace('\n', " ").trim().to_string(),
                    });
                }
            }
            Block::Heading(_, text) => {
                node.paragraphs
                    .push(Paragraph::new(vec![Run::bold(text.trim())]));
            }
            Block::Paragraph(runs) => node.paragraphs.push(Paragraph::new(runs)),
            Block::Table(rows) => {
                if node.table.is_none() {
                    node.table = Some(Table { rows });
                }
            }
        }
    }

    node
}
