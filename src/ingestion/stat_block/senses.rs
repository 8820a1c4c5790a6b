//! Senses and languages.
//!
//! Some exports drop the senses label and fold senses into the paragraph just
//! before the languages line (and the reverse for languages). Both extractors
//! fall back to that neighbouring paragraph when their own label is absent.
//!
//! Language clauses come in three shapes, checked in this order:
//!
//! 1. `Common, Elvish, but cannot speak; telepathy 36 m.`
//! 2. `Common, Draconic, but doesn't speak it`
//! 3. `Common and Goblin`

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ingestion::content_node::ContentNode;

use super::error::{Field, FieldError, FieldResult};
use super::fields::{capitalize, clean_text, find_label, lookup};

static CANNOT_SPEAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)
        ,?\s*
        \bbut\s+(?:cannot|can't|can\s+not)\s+speak
        (?:\s+(?:it|them|any\s+languages?))?
        \.?
        ",
    )
    .expect("Failed to compile cannot-speak regex")
});

static DOESNT_SPEAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)
        ,?\s*
        (?P<qualifier>\bbut\s+(?:doesn't|does\s+not)\s+speak\s+(?:it|them))
        \.?\s*$
        ",
    )
    .expect("Failed to compile doesn't-speak regex")
});

static LEADING_UNDERSTANDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*understands\b").expect("Failed to compile understands regex"));

static TELEPATHY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\btelepathy\b").expect("Failed to compile telepathy regex"));

/// List separators: commas and the conjunctions `and` / `or`.
static LIST_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*,\s*|\s+and\s+|\s+or\s+").expect("Failed to compile list separator regex")
});

// ============================================================================
// Senses
// ============================================================================

pub fn extract_senses(
    node: &ContentNode,
    senses_label: &str,
    languages_label: &str,
) -> FieldResult<Vec<String>> {
    let text = match lookup(node, senses_label) {
        Some(field) => field.text,
        None => {
            let neighbour = find_label(node, languages_label)
                .and_then(|index| index.checked_sub(1))
                .filter(|index| *index > 0)
                .and_then(|index| node.paragraph(index))
                .ok_or_else(|| FieldError::missing(senses_label))?;
            log::debug!("No `{senses_label}` label, reading senses before `{languages_label}`");
            clean_text(&neighbour.text())
        }
    };

    Ok(text
        .split(',')
        .map(|token| capitalize(token.trim()))
        .filter(|token| !token.is_empty())
        .collect())
}

// ============================================================================
// Languages
// ============================================================================

pub fn extract_languages(
    node: &ContentNode,
    languages_label: &str,
    senses_label: &str,
) -> FieldResult<Vec<String>> {
    let text = match lookup(node, languages_label) {
        Some(field) => field.text,
        None => {
            let neighbour = find_label(node, senses_label)
                .and_then(|index| node.paragraph(index + 1))
                .ok_or_else(|| FieldError::missing(languages_label))?;
            log::debug!("No `{languages_label}` label, reading languages after `{senses_label}`");
            clean_text(&neighbour.text())
        }
    };
    parse_languages(&text)
}

/// Parse a languages clause into display tokens.
pub fn parse_languages(text: &str) -> FieldResult<Vec<String>> {
    if CANNOT_SPEAK.is_match(text) {
        return Ok(parse_cannot_speak(text));
    }

    if let Some(caps) = DOESNT_SPEAK.captures(text) {
        let qualifier = clean_text(&caps["qualifier"]);
        let mut tokens = split_list(&text[..caps.get(0).map_or(0, |m| m.start())]);
        let last = tokens.last_mut().ok_or_else(|| {
            FieldError::malformed(
                Field::Languages,
                format!("`{qualifier}` with no language to attach to"),
            )
        })?;
        last.push_str(", ");
        last.push_str(&qualifier);
        return Ok(tokens);
    }

    Ok(split_list(text))
}

fn parse_cannot_speak(text: &str) -> Vec<String> {
    let (languages, trailing) = match text.split_once(';') {
        Some((head, tail)) => (head, Some(tail.trim())),
        None => (text, None),
    };

    let languages = CANNOT_SPEAK.replace(languages, "");
    let languages = LEADING_UNDERSTANDS.replace(&languages, "");

    let mut result = vec!["Cannot speak".to_string()];
    result.extend(
        split_list(&languages)
            .into_iter()
            .map(|language| format!("Understands {language}")),
    );

    if let Some(segment) = trailing.filter(|s| TELEPATHY.is_match(s)) {
        result.push(capitalize(segment));
    }
    result
}

fn split_list(text: &str) -> Vec<String> {
    LIST_SEPARATOR
        .split(text.trim())
        .map(str::trim)
        .filter(|token| !token.is_empty() && !is_placeholder(token))
        .map(capitalize)
        .collect()
}

fn is_placeholder(token: &str) -> bool {
    matches!(token, "-" | "\u{2013}" | "\u{2014}")
}
