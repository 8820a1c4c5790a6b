//! Labeled-field lookup and shared token helpers.
//!
//! A label is a bold run (`**Armor Class**`) whose text matches the label
//! phrase, optionally followed by a colon. The labeled text is everything
//! after that run up to the end of the paragraph or the next bold run.

use crate::ingestion::content_node::ContentNode;

use super::error::{FieldError, FieldResult};

/// Text found after a label, with the paragraph it lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledField {
    pub paragraph: usize,
    pub text: String,
}

/// Whether a run's text names the given label (`Speed`, `Speed:`, `Speed `).
pub fn label_matches(run_text: &str, label: &str) -> bool {
    let candidate = run_text.trim().trim_end_matches(':').trim_end();
    candidate.eq_ignore_ascii_case(label.trim())
}

/// Index of the first paragraph holding a bold run that matches `label`.
pub fn find_label(node: &ContentNode, label: &str) -> Option<usize> {
    node.paragraphs().iter().position(|p| {
        p.runs
            .iter()
            .any(|r| r.emphasis.is_bold() && label_matches(&r.text, label))
    })
}

/// Look up the text following `label`. `None` when the label is absent.
pub fn lookup(node: &ContentNode, label: &str) -> Option<LabeledField> {
    for (index, paragraph) in node.paragraphs().iter().enumerate() {
        let Some(start) = paragraph
            .runs
            .iter()
            .position(|r| r.emphasis.is_bold() && label_matches(&r.text, label))
        else {
            continue;
        };

        let text: String = paragraph.runs[start + 1..]
            .iter()
            .take_while(|r| !r.emphasis.is_bold())
            .map(|r| r.text.as_str())
            .collect();

        return Some(LabeledField {
            paragraph: index,
            text: clean_text(&text),
        });
    }
    None
}

/// Like [`lookup`], but reports a missing label as [`FieldError::MissingLabel`].
pub fn require(node: &ContentNode, label: &str) -> FieldResult<LabeledField> {
    lookup(node, label).ok_or_else(|| FieldError::missing(label))
}

/// Split a damage clause into its comma-delimited tokens.
pub fn damage_tokens(text: &str) -> Vec<String> {
    text.split(',')
        .map(clean_text)
        .filter(|token| !token.is_empty())
        .collect()
}

// ============================================================================
// Text helpers
// ============================================================================

/// Join lines and collapse runs of whitespace.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replace Unicode minus and dash variants with an ASCII hyphen.
pub fn normalize_minus(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2212}' | '\u{2013}' | '\u{2012}' | '\u{FE63}' | '\u{FF0D}' => '-',
            other => other,
        })
        .collect()
}

/// Parse a signed integer such as `+5`, `-1`, `−2` or `12`.
pub fn parse_signed(text: &str) -> Option<i32> {
    let normalized = normalize_minus(text);
    let compact: String = normalized.chars().filter(|c| !c.is_whitespace()).collect();
    compact.strip_prefix('+').unwrap_or(&compact).parse().ok()
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Strip the trailing period or colon from a block name.
pub fn entry_name(text: &str) -> String {
    clean_text(text)
        .trim_end_matches(['.', ':'])
        .trim_end()
        .to_string()
}
