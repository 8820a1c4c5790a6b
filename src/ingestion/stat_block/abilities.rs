//! Ability scores, initiative, saving throws and skills.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ingestion::content_node::ContentNode;

use super::error::{Field, FieldError, FieldResult};
use super::fields::{clean_text, lookup, parse_signed};
use super::types::{AbilityScores, ModifierMap};

/// Ability table cell: `{score} ({modifier})`.
static ABILITY_CELL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<score>[^(]+?)\s*\((?P<modifier>[^)]*)\)")
        .expect("Failed to compile ability cell regex")
});

/// Saving throw: `{abbr} {signed-int}`.
static SAVING_THROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<abbr>\w{3})\s+(?P<value>[+\-\u{2212}\u{2013}]?\s*\d+)")
        .expect("Failed to compile saving throw regex")
});

/// Skill: `{skill name} {signed-int}`.
static SKILL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<name>\w[\w\s'-]*?)\s+(?P<value>[+\-\u{2212}\u{2013}]?\s*\d+)$")
        .expect("Failed to compile skill regex")
});

/// Skill qualifier: `({signed-int} {qualifier text})`.
static SKILL_QUALIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(\s*(?P<value>[+\-\u{2212}\u{2013}]?\s*\d+)\s*(?P<text>[^)]*)\)")
        .expect("Failed to compile skill qualifier regex")
});

/// Number of ability columns in the table.
pub const ABILITY_COUNT: usize = 6;

// ============================================================================
// Table
// ============================================================================

fn ability_row(node: &ContentNode, field: Field) -> FieldResult<&[String]> {
    node.table()
        .and_then(|t| t.row(1))
        .ok_or_else(|| FieldError::malformed(field, "stat block has no ability score row"))
}

fn parse_cell(cell: &str, field: Field) -> FieldResult<(i32, &str)> {
    let caps = ABILITY_CELL.captures(cell).ok_or_else(|| {
        FieldError::malformed(field, format!("expected `score (modifier)`, got `{cell}`"))
    })?;
    let score = parse_signed(caps.name("score").map_or("", |m| m.as_str()))
        .ok_or_else(|| FieldError::malformed(field, format!("bad score in `{cell}`")))?;
    let modifier = caps.name("modifier").map_or("", |m| m.as_str());
    Ok((score, modifier))
}

/// The six ability scores, assigned positionally.
pub fn extract_abilities(node: &ContentNode) -> FieldResult<AbilityScores> {
    let row = ability_row(node, Field::Abilities)?;
    if row.len() != ABILITY_COUNT {
        return Err(FieldError::malformed(
            Field::Abilities,
            format!("expected {ABILITY_COUNT} ability cells, found {}", row.len()),
        ));
    }

    let mut scores = [0; ABILITY_COUNT];
    for (slot, cell) in scores.iter_mut().zip(row) {
        *slot = parse_cell(cell, Field::Abilities)?.0;
    }
    Ok(AbilityScores::from_array(scores))
}

/// Initiative bonus: the modifier of the configured ability column.
pub fn extract_initiative(node: &ContentNode, column: usize) -> FieldResult<i32> {
    let row = ability_row(node, Field::Initiative)?;
    let cell = row.get(column).ok_or_else(|| {
        FieldError::malformed(Field::Initiative, format!("no ability cell at column {column}"))
    })?;
    let (_, modifier) = parse_cell(cell, Field::Initiative)?;
    parse_signed(modifier).ok_or_else(|| {
        FieldError::malformed(Field::Initiative, format!("bad modifier `{modifier}`"))
    })
}

// ============================================================================
// Saving Throws and Skills
// ============================================================================

/// Saving throw modifiers keyed by ability abbreviation. Empty when the label
/// is absent; segments that do not match are skipped.
pub fn extract_saving_throws(node: &ContentNode, label: &str) -> ModifierMap {
    let mut result = ModifierMap::new();
    let Some(field) = lookup(node, label) else {
        return result;
    };

    for segment in field.text.split(',') {
        let parsed = SAVING_THROW
            .captures(segment)
            .and_then(|caps| Some((caps["abbr"].to_string(), parse_signed(&caps["value"])?)));
        match parsed {
            Some((abbr, value)) => {
                result.insert(abbr, value);
            }
            None => log::debug!("Skipping saving throw segment `{}`", segment.trim()),
        }
    }
    result
}

/// Skill modifiers. A qualifier such as `Perception +5 (+8 with sight)` adds a
/// second entry `Perception with sight: 8`.
pub fn extract_skills(node: &ContentNode, label: &str) -> ModifierMap {
    let mut result = ModifierMap::new();
    let Some(field) = lookup(node, label) else {
        return result;
    };

    for segment in split_outside_parens(&field.text) {
        let qualifier = SKILL_QUALIFIER.captures(&segment);
        let base = match &qualifier {
            Some(caps) => clean_text(&segment.replacen(&caps[0], "", 1)),
            None => clean_text(&segment),
        };

        let Some(caps) = SKILL.captures(&base) else {
            log::debug!("Skipping skill segment `{}`", segment.trim());
            continue;
        };
        let name = caps["name"].trim().to_string();
        let Some(value) = parse_signed(&caps["value"]) else {
            continue;
        };

        if let Some(q) = qualifier {
            if let Some(alt) = parse_signed(&q["value"]) {
                let text = clean_text(&q["text"]);
                result.insert(name.clone(), value);
                result.insert(format!("{name} {text}"), alt);
                continue;
            }
        }
        result.insert(name, value);
    }
    result
}

fn split_outside_parens(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                segments.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    segments.push(current);
    segments.retain(|s| !s.trim().is_empty());
    segments
}
