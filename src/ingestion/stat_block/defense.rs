//! Armor class, hit points and damage interactions.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ingestion::content_node::ContentNode;

use super::error::{Field, FieldError, FieldResult};
use super::fields::{capitalize, damage_tokens, lookup, require};
use super::types::{ArmorClassEntry, HitPoints};

/// `{amount} [({type or alternate})] [{condition}]`
static ARMOR_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^(?P<amount>\d+)
        \s*
        (?:\((?P<paren>[^)]*)\))?
        \s*
        (?P<condition>.*)$
        ",
    )
    .expect("Failed to compile armor class regex")
});

/// `{amount} ({dice})`
static HIT_POINTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<amount>\d+)\s*\((?P<dice>[^)]+)\)")
        .expect("Failed to compile hit points regex")
});

// ============================================================================
// Armor Class
// ============================================================================

pub fn extract_armor_class(node: &ContentNode, label: &str) -> FieldResult<Vec<ArmorClassEntry>> {
    let field = require(node, label)?;
    parse_armor_class(&field.text)
}

/// Parse an armor class clause into one or more entries.
///
/// Top-level commas separate alternates only when the next segment starts
/// with a number; `15 (leather armor, shield)` stays a single entry. A
/// parenthetical that starts with a number (`12 (15 with mage armor)`) is an
/// alternate entry rather than an armor type.
pub fn parse_armor_class(text: &str) -> FieldResult<Vec<ArmorClassEntry>> {
    let mut groups: Vec<String> = Vec::new();
    for segment in text.split(',') {
        let segment = segment.trim();
        match groups.last_mut() {
            Some(last) if !starts_with_digit(segment) => {
                last.push_str(", ");
                last.push_str(segment);
            }
            _ => groups.push(segment.to_string()),
        }
    }

    let mut entries = Vec::new();
    for group in &groups {
        parse_armor_entry(group, &mut entries)?;
    }
    Ok(entries)
}

fn parse_armor_entry(text: &str, entries: &mut Vec<ArmorClassEntry>) -> FieldResult<()> {
    let caps = ARMOR_CLASS.captures(text.trim()).ok_or_else(|| {
        FieldError::malformed(Field::ArmorClass, format!("expected a number in `{text}`"))
    })?;
    let amount: u32 = caps["amount"]
        .parse()
        .map_err(|_| FieldError::malformed(Field::ArmorClass, format!("bad amount in `{text}`")))?;
    if amount == 0 {
        return Err(FieldError::malformed(
            Field::ArmorClass,
            "armor class must be positive",
        ));
    }

    let condition = caps["condition"].trim().to_string();
    match caps.name("paren").map(|m| m.as_str().trim()) {
        Some(paren) if starts_with_digit(paren) => {
            entries.push(ArmorClassEntry::new(amount, "", condition));
            parse_armor_entry(paren, entries)
        }
        Some(paren) => {
            entries.push(ArmorClassEntry::new(amount, paren, condition));
            Ok(())
        }
        None => {
            entries.push(ArmorClassEntry::new(amount, "", condition));
            Ok(())
        }
    }
}

fn starts_with_digit(text: &str) -> bool {
    text.chars().next().is_some_and(|c| c.is_ascii_digit())
}

// ============================================================================
// Hit Points
// ============================================================================

pub fn extract_hit_points(node: &ContentNode, label: &str) -> FieldResult<HitPoints> {
    let field = require(node, label)?;
    parse_hit_points(&field.text)
}

pub fn parse_hit_points(text: &str) -> FieldResult<HitPoints> {
    let caps = HIT_POINTS.captures(text.trim()).ok_or_else(|| {
        FieldError::malformed(Field::HitPoints, format!("expected `N (dice)`, got `{text}`"))
    })?;
    let amount = caps["amount"]
        .parse()
        .map_err(|_| FieldError::malformed(Field::HitPoints, format!("bad amount in `{text}`")))?;
    Ok(HitPoints {
        amount,
        dice: caps["dice"].trim().to_string(),
    })
}

// ============================================================================
// Damage Interactions
// ============================================================================

/// Vulnerabilities, resistances or immunities. Empty when the label is absent.
pub fn extract_damage_list(node: &ContentNode, label: &str) -> Vec<String> {
    lookup(node, label)
        .map(|field| damage_tokens(&field.text))
        .unwrap_or_default()
}

/// Condition immunities, capitalized. Empty when the label is absent.
pub fn extract_condition_immunities(node: &ContentNode, label: &str) -> Vec<String> {
    extract_damage_list(node, label)
        .iter()
        .map(|token| capitalize(token))
        .collect()
}
