//! Property-based tests for stat block extraction
//!
//! Tests invariants:
//! - Extraction is deterministic
//! - Ability scores are assigned positionally
//! - Damage and speed lists preserve source order
//! - Only malformed fields are reported as failures

use proptest::prelude::*;

use crate::ingestion::content_node::{ContentNode, HeadingLevel, Run};
use crate::ingestion::stat_block::{AbilityScores, StatBlockParser};

const HEADERS: [&str; 6] = ["STR", "DEX", "CON", "INT", "WIS", "CHA"];

const OPTIONAL_LABELS: [&str; 6] = [
    "Saving Throws",
    "Skills",
    "Damage Vulnerabilities",
    "Damage Resistances",
    "Damage Immunities",
    "Condition Immunities",
];

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

fn arb_scores() -> impl Strategy<Value = [i32; 6]> {
    prop::array::uniform6(1i32..=30)
}

/// Distinct lowercase damage words.
fn arb_damage_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-z]{3,10}", 1..6)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

/// Extra movement modes with their distances, in source order.
fn arb_speed_modes() -> impl Strategy<Value = Vec<(&'static str, i32)>> {
    prop::sample::subsequence(vec!["burrow", "climb", "fly", "swim"], 0..=4)
        .prop_shuffle()
        .prop_flat_map(|modes| {
            let len = modes.len();
            (Just(modes), prop::collection::vec(0i32..200, len))
        })
        .prop_map(|(modes, distances)| modes.into_iter().zip(distances).collect())
}

fn ability_cell(score: i32) -> String {
    format!("{score} ({:+})", AbilityScores::modifier(score))
}

fn block(scores: [i32; 6], speed: &str, resistances: &[String], keep: &[bool]) -> ContentNode {
    let cells: Vec<String> = scores.iter().map(|s| ability_cell(*s)).collect();
    let cells: Vec<&str> = cells.iter().map(String::as_str).collect();

    let mut builder = ContentNode::builder()
        .heading(HeadingLevel::H3, "Test Creature")
        .text("Medium monstrosity, unaligned")
        .labeled("Armor Class", " 13 (natural armor)")
        .labeled("Hit Points", " 22 (4d8 + 4)")
        .labeled("Speed", format!(" {speed}"))
        .table(&HEADERS, &cells);

    for (label, present) in OPTIONAL_LABELS.iter().zip(keep) {
        if !present {
            continue;
        }
        let value = match *label {
            "Saving Throws" => " Dex +3".to_string(),
            "Skills" => " Perception +2".to_string(),
            "Damage Resistances" => format!(" {}", resistances.join(", ")),
            _ => " poison".to_string(),
        };
        builder = builder.labeled(*label, value);
    }

    builder
        .labeled("Senses", " passive Perception 12")
        .labeled("Languages", " Common")
        .labeled("Challenge", " 1 (200 XP)")
        .paragraph(vec![Run::bold("Actions")])
        .paragraph(vec![Run::bold_italic("Claw."), Run::plain(" Slashing damage.")])
        .build()
}

fn speed_clause(modes: &[(&str, i32)]) -> String {
    let mut parts = vec!["9 m.".to_string()];
    parts.extend(modes.iter().map(|(mode, d)| format!("{mode} {d} m.")));
    parts.join(", ")
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: parsing the same block twice yields equal extractions
    #[test]
    fn prop_parse_is_deterministic(
        scores in arb_scores(),
        resistances in arb_damage_list(),
        keep in prop::array::uniform6(any::<bool>()),
    ) {
        let node = block(scores, "9 m.", &resistances, &keep);
        let parser = StatBlockParser::new();
        prop_assert_eq!(parser.parse(&node), parser.parse(&node));
    }

    /// Property: ability scores land in STR, DEX, CON, INT, WIS, CHA order
    #[test]
    fn prop_abilities_are_positional(scores in arb_scores()) {
        let node = block(scores, "9 m.", &[], &[false; 6]);
        let record = StatBlockParser::new().parse(&node).record;
        prop_assert_eq!(record.abilities.to_array(), scores);
        prop_assert_eq!(record.initiative, AbilityScores::modifier(scores[1]));
    }

    /// Property: damage tokens keep their source order
    #[test]
    fn prop_damage_list_keeps_order(resistances in arb_damage_list()) {
        let mut keep = [false; 6];
        keep[3] = true;
        let node = block([10; 6], "9 m.", &resistances, &keep);
        let record = StatBlockParser::new().parse(&node).record;
        prop_assert_eq!(record.resistances, resistances);
    }

    /// Property: every listed mode appears once, in source order
    #[test]
    fn prop_speed_modes_keep_order(modes in arb_speed_modes()) {
        let node = block([10; 6], &speed_clause(&modes), &[], &[false; 6]);
        let record = StatBlockParser::new().parse(&node).record;

        let mut expected = vec![("walking".to_string(), 9)];
        expected.extend(modes.iter().map(|(m, d)| (m.to_string(), *d)));
        let actual: Vec<(String, i32)> = record.speed.into_iter().collect();
        prop_assert_eq!(actual, expected);
    }

    /// Property: absent optional labels leave fields empty without failures
    #[test]
    fn prop_absent_labels_are_not_failures(
        keep in prop::array::uniform6(any::<bool>()),
        resistances in arb_damage_list(),
    ) {
        let node = block([10; 6], "9 m.", &resistances, &keep);
        let extraction = StatBlockParser::new().parse(&node);
        prop_assert!(extraction.is_complete(), "{:?}", extraction.failures);

        let record = extraction.record;
        prop_assert_eq!(record.saving_throws.is_empty(), !keep[0]);
        prop_assert_eq!(record.skills.is_empty(), !keep[1]);
        prop_assert_eq!(record.vulnerabilities.is_empty(), !keep[2]);
        prop_assert_eq!(record.resistances.is_empty(), !keep[3]);
        prop_assert_eq!(record.immunities.is_empty(), !keep[4]);
        prop_assert_eq!(record.condition_immunities.is_empty(), !keep[5]);
    }

    /// Property: the modifier is floor((score - 10) / 2)
    #[test]
    fn prop_modifier_formula(score in -10i32..=40) {
        let modifier = AbilityScores::modifier(score);
        prop_assert!(2 * modifier <= score - 10);
        prop_assert!(score - 10 < 2 * modifier + 2);
    }
}
