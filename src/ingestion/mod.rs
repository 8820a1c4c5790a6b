//! Stat block ingestion.
//!
//! - [`content_node`]: the read-only stat block model extractors consume
//! - [`markdown_parser`]: Markdown → content node adapter
//! - [`stat_block`]: field extractors and the record orchestrator

pub mod content_node;
pub mod markdown_parser;
pub mod stat_block;

pub use content_node::{ContentNode, Emphasis, Heading, HeadingLevel, Paragraph, Run, Table};
pub use markdown_parser::MarkdownStatBlockParser;
pub use stat_block::{Extraction, MonsterRecord, StatBlockParser};
