//! Name, subtitle and description extraction.
//!
//! The subtitle comes in three shapes, tried in order:
//!
//! 1. `Medium humanoid (any race), neutral`: parenthetical tags
//! 2. `Medium swarm of Tiny beasts, unaligned`: swarm form, the leading size
//!    optional
//! 3. `Large dragon, chaotic evil`: plain size and type
//!
//! The swarm form is a best-effort heuristic over a fixed sentence template.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ingestion::content_node::ContentNode;

use super::error::{Field, FieldError, FieldResult};
use super::fields::{capitalize, clean_text, find_label};

// ============================================================================
// Patterns
// ============================================================================

const SIZES: [&str; 6] = ["tiny", "small", "medium", "large", "huge", "gargantuan"];

/// First parenthetical group: `(any race)`.
static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]*)\)").expect("Failed to compile parenthetical regex"));

/// `{size} {type}`, where size may be a choice (`Medium or Small`).
static SIZE_TYPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)
        ^(?P<size>
            (?:tiny|small|medium|large|huge|gargantuan)
            (?:\s+or\s+(?:tiny|small|medium|large|huge|gargantuan))?
        )
        \s+
        (?P<type>.+)$
        ",
    )
    .expect("Failed to compile size/type regex")
});

/// Tail of the swarm form after its keyword: `of [count] {size} {types}`.
static SWARM_TAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)
        ^\s+of\s+
        (?:\S+\s+)*?                    # optional count words
        (?P<size>tiny|small|medium|large|huge|gargantuan)
        \s+
        (?P<types>\w+)
        ",
    )
    .expect("Failed to compile swarm regex")
});

// ============================================================================
// Types
// ============================================================================

/// Alignment, size, type and tags from the subtitle line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taxonomy {
    pub alignment: String,
    pub size: String,
    pub creature_type: String,
    pub tags: Vec<String>,
}

// ============================================================================
// Extractors
// ============================================================================

/// The stat block name from its heading.
pub fn extract_name(node: &ContentNode) -> FieldResult<String> {
    node.heading_text()
        .map(clean_text)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| FieldError::malformed(Field::Name, "stat block has no name heading"))
}

/// Parse the subtitle line (the first paragraph).
pub fn extract_taxonomy(node: &ContentNode, swarm_keyword: &str) -> FieldResult<Taxonomy> {
    let subtitle = node
        .paragraph(0)
        .map(|p| clean_text(&p.text()))
        .ok_or_else(|| FieldError::malformed(Field::Taxonomy, "stat block has no subtitle"))?;
    parse_subtitle(&subtitle, swarm_keyword)
}

/// Parse a subtitle such as `Medium humanoid (any race), neutral`.
pub fn parse_subtitle(subtitle: &str, swarm_keyword: &str) -> FieldResult<Taxonomy> {
    let (head, alignment) = subtitle.rsplit_once(',').ok_or_else(|| {
        FieldError::malformed(Field::Taxonomy, format!("no alignment in `{subtitle}`"))
    })?;
    let alignment = alignment.trim().to_string();
    let head = head.trim();

    if let Some(caps) = PARENTHETICAL.captures(head) {
        let tags = caps[1]
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        let rest = clean_text(&head.replacen(&caps[0], "", 1));
        let (size, creature_type) = split_size_type(&rest)?;
        return Ok(Taxonomy {
            alignment,
            size,
            creature_type,
            tags,
        });
    }

    // `Medium swarm of Tiny beasts`: the leading size is the swarm's own.
    let (swarm_size, swarm_head) = match head.split_once(char::is_whitespace) {
        Some((first, rest)) if is_size(first) => (Some(first), rest.trim_start()),
        _ => (None, head),
    };
    if let Some(tail) = strip_keyword(swarm_head, swarm_keyword) {
        let caps = SWARM_TAIL.captures(tail).ok_or_else(|| {
            FieldError::malformed(Field::Taxonomy, format!("unrecognized swarm form `{head}`"))
        })?;
        return Ok(Taxonomy {
            alignment,
            size: capitalize(swarm_size.unwrap_or(&caps["size"])),
            creature_type: capitalize(&singularize(&caps["types"])),
            tags: vec![capitalize(&swarm_head[..swarm_keyword.len()])],
        });
    }

    let (size, creature_type) = split_size_type(head)?;
    Ok(Taxonomy {
        alignment,
        size,
        creature_type,
        tags: Vec::new(),
    })
}

/// Paragraphs between the subtitle and the armor class line.
pub fn extract_description(node: &ContentNode, armor_class_label: &str) -> FieldResult<String> {
    let end = find_label(node, armor_class_label)
        .ok_or_else(|| FieldError::missing(armor_class_label))?;
    let lines: Vec<String> = node
        .paragraphs()
        .iter()
        .take(end)
        .skip(1)
        .map(|p| clean_text(&p.text()))
        .filter(|line| !line.is_empty())
        .collect();
    Ok(lines.join("\n"))
}

fn split_size_type(text: &str) -> FieldResult<(String, String)> {
    let caps = SIZE_TYPE.captures(text).ok_or_else(|| {
        FieldError::malformed(Field::Taxonomy, format!("no size and type in `{text}`"))
    })?;
    Ok((caps["size"].to_string(), caps["type"].trim().to_string()))
}

/// The text after a leading `keyword`, matched case-insensitively as a whole
/// word.
fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let prefix = text.get(..keyword.len())?;
    let tail = &text[keyword.len()..];
    let boundary = tail.chars().next().map_or(true, char::is_whitespace);
    (prefix.eq_ignore_ascii_case(keyword) && boundary).then_some(tail)
}

fn is_size(word: &str) -> bool {
    SIZES.iter().any(|size| size.eq_ignore_ascii_case(word))
}

fn singularize(plural: &str) -> String {
    let mut word = plural.to_string();
    if word.len() > 1 && word.ends_with(['s', 'S']) {
        word.pop();
    }
    word
}
