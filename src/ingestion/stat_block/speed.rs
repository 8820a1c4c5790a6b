//! Movement speed extraction.
//!
//! `9 m., fly 18 m.` becomes `{walking: 9, fly: 18}`. A parenthetical that
//! states a form (`18 m. (30 m. while in wolf form)`) expands into extra
//! modes keyed with the condition: `{walking: 18, walking in wolf form: 30}`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ingestion::content_node::ContentNode;

use super::error::{Field, FieldError, FieldResult};
use super::fields::{clean_text, parse_signed, require};
use super::types::SpeedMap;

static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^)]*)\)").expect("Failed to compile parenthetical regex"));

/// Form condition inside a parenthetical: `while in wolf form`,
/// `in the form of a bat`.
static FORM_CONDITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?ix)
        (?:\bwhile\s+)?
        (?P<condition>
            \bin\s+
            (?:
                the\s+form\s+of\b.*
                |
                [\w\s-]*?\bform\b.*
            )
        )
        ",
    )
    .expect("Failed to compile form condition regex")
});

/// Distance with a decimal part: `1,5` or `1.5`.
static FRACTIONAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+\-\u{2212}]?\d+[.,]\d+$")
        .expect("Failed to compile fractional distance regex")
});

pub fn extract_speed(node: &ContentNode, label: &str, walking_mode: &str) -> FieldResult<SpeedMap> {
    let field = require(node, label)?;
    parse_speed(&field.text, walking_mode)
}

/// Parse a speed clause into a mode → distance map.
pub fn parse_speed(text: &str, walking_mode: &str) -> FieldResult<SpeedMap> {
    let mut main = text.to_string();
    let mut conditional: Vec<(String, String)> = Vec::new();

    if let Some(caps) = PARENTHETICAL.captures(text) {
        let inner = &caps[1];
        if let Some(form) = FORM_CONDITION.captures(inner) {
            let condition = clean_text(&form["condition"]);
            let distances = inner.replacen(&form[0], "", 1);
            for distance in split_segments(&distances) {
                conditional.push((distance, condition.clone()));
            }
            main = text.replacen(&caps[0], "", 1);
        }
    }

    let mut speeds = SpeedMap::new();
    for segment in split_segments(&main) {
        let segment = segment.as_str();
        if segment.starts_with('(') {
            // Qualifier for the previous mode, e.g. `fly 18 m. (hover)`.
            let Some((key, distance)) = speeds.pop() else {
                return Err(FieldError::malformed(
                    Field::Speed,
                    format!("qualifier `{segment}` before any speed"),
                ));
            };
            insert_unique(&mut speeds, format!("{key} {segment}"), distance)?;
            continue;
        }
        let (mode, distance) = parse_segment(segment, walking_mode)?;
        insert_unique(&mut speeds, mode, distance)?;
    }

    for (segment, condition) in conditional {
        let (mode, distance) = parse_segment(&segment, walking_mode)?;
        insert_unique(&mut speeds, format!("{mode} {condition}"), distance)?;
    }

    if speeds.is_empty() {
        return Err(FieldError::malformed(Field::Speed, "no speeds listed"));
    }
    Ok(speeds)
}

fn insert_unique(speeds: &mut SpeedMap, mode: String, distance: i32) -> FieldResult<()> {
    if speeds.contains_key(&mode) {
        return Err(FieldError::malformed(
            Field::Speed,
            format!("speed `{mode}` listed twice"),
        ));
    }
    speeds.insert(mode, distance);
    Ok(())
}

/// Split on `.` and `,` outside parentheses. A separator only counts when
/// followed by whitespace or the end of the clause, so `1,5` and `1.5` stay
/// whole.
fn split_segments(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            '.' | ',' if depth == 0 && chars.peek().map_or(true, |n| n.is_whitespace()) => {
                segments.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    segments.push(current);

    segments
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse `18 m` or `fly 18 m` into (mode, distance).
fn parse_segment(segment: &str, walking_mode: &str) -> FieldResult<(String, i32)> {
    let mut tokens: Vec<&str> = segment.split_whitespace().collect();
    let mut mode_words: Vec<String> = Vec::new();

    if let Some(token) = tokens.iter().find(|t| FRACTIONAL.is_match(t)) {
        return Err(FieldError::malformed(
            Field::Speed,
            format!("fractional distance `{token}` in `{segment}`"),
        ));
    }

    let leads_with_number = tokens
        .first()
        .is_some_and(|t| parse_signed(t.trim_end_matches('.')).is_some());
    if !leads_with_number && !tokens.is_empty() {
        mode_words.push(tokens.remove(0).to_lowercase());
    }

    let distance = tokens
        .first()
        .and_then(|t| parse_signed(t.trim_end_matches('.')))
        .ok_or_else(|| {
            FieldError::malformed(Field::Speed, format!("no distance in `{segment}`"))
        })?;

    // Skip the distance and its unit; anything left qualifies the mode.
    mode_words.extend(tokens.iter().skip(2).map(|t| t.to_string()));

    let mode = if mode_words.is_empty() {
        walking_mode.to_string()
    } else {
        mode_words.join(" ")
    };
    Ok((mode, distance))
}
