//! Stat Block Parser Tests
//!
//! Markdown fixtures run through the full parser.

use crate::ingestion::stat_block::{AbilityScores, Action, Field, HitPoints};
use crate::tests::common::*;

// =============================================================================
// Name and Subtitle
// =============================================================================

#[test]
fn test_goblin_subtitle() {
    let record = parser().parse_markdown(GOBLIN).record;
    assert_eq!(record.name, "Goblin");
    assert_eq!(record.size, "Small");
    assert_eq!(record.creature_type, "humanoid");
    assert_eq!(record.tags, vec!["goblinoid"]);
    assert_eq!(record.alignment, "neutral evil");
    assert_eq!(record.description, "");
}

#[test]
fn test_swarm_subtitle() {
    let extraction = parser().parse_markdown(RAT_SWARM);
    assert!(extraction.is_complete(), "{:?}", extraction.failures);

    let record = extraction.record;
    assert_eq!(record.name, "Swarm of Rats");
    assert_eq!(record.size, "Tiny");
    assert_eq!(record.creature_type, "Beast");
    assert_eq!(record.tags, vec!["Swarm"]);
    assert_eq!(record.alignment, "unaligned");
}

#[test]
fn test_h4_heading_is_used_without_h3() {
    let record = parser().parse_markdown(HOMUNCULUS).record;
    assert_eq!(record.name, "Homunculus");
    assert_eq!(record.size, "Tiny");
    assert_eq!(record.creature_type, "construct");
}

#[test]
fn test_description_between_subtitle_and_armor_class() {
    let record = parser().parse_markdown(MAGE).record;
    assert_eq!(
        record.description,
        "Mages spend their lives in the study and practice of magic."
    );
}

// =============================================================================
// Defense
// =============================================================================

#[test]
fn test_armor_type_with_comma_is_one_entry() {
    let record = parser().parse_markdown(GOBLIN).record;
    assert_eq!(record.armor_class.len(), 1);
    assert_eq!(record.armor_class[0].amount, 15);
    assert_eq!(record.armor_class[0].armor_type, "leather armor, shield");
}

#[test]
fn test_alternate_armor_class_in_parenthetical() {
    let record = parser().parse_markdown(MAGE).record;
    let amounts: Vec<u32> = record.armor_class.iter().map(|ac| ac.amount).collect();
    assert_eq!(amounts, vec![12, 15]);
    assert_eq!(record.armor_class[1].condition, "with mage armor");
}

#[test]
fn test_form_dependent_armor_class() {
    let record = parser().parse_markdown(WEREWOLF).record;
    assert_eq!(record.armor_class.len(), 2);
    assert_eq!(record.armor_class[0].amount, 11);
    assert_eq!(record.armor_class[0].condition, "in humanoid form");
    assert_eq!(record.armor_class[1].amount, 12);
    assert_eq!(record.armor_class[1].armor_type, "natural armor");
    assert_eq!(record.armor_class[1].condition, "in wolf or hybrid form");
}

#[test]
fn test_hit_points() {
    let record = parser().parse_markdown(DRAGON).record;
    assert_eq!(
        record.hit_points,
        HitPoints {
            amount: 195,
            dice: "17d12 + 85".to_string(),
        }
    );
}

#[test]
fn test_damage_and_condition_lists_keep_order() {
    let record = parser().parse_markdown(RAT_SWARM).record;
    assert_eq!(record.resistances, vec!["bludgeoning", "piercing", "slashing"]);
    assert_eq!(
        record.condition_immunities,
        vec!["Charmed", "Frightened", "Grappled", "Paralyzed"]
    );
    assert!(record.vulnerabilities.is_empty());
    assert!(record.immunities.is_empty());
}

// =============================================================================
// Speed, Abilities, Skills
// =============================================================================

#[test]
fn test_multiple_speeds() {
    let record = parser().parse_markdown(DRAGON).record;
    let keys: Vec<&str> = record.speed.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["walking", "fly", "swim"]);
    assert_eq!(record.speed["fly"], 24);
}

#[test]
fn test_form_speed() {
    let record = parser().parse_markdown(WEREWOLF).record;
    assert_eq!(record.speed.get("walking"), Some(&9));
    assert_eq!(record.speed.get("walking in wolf form"), Some(&12));
}

#[test]
fn test_abilities_and_initiative_with_unicode_minus() {
    let record = parser().parse_markdown(GOBLIN).record;
    assert_eq!(record.abilities.to_array(), [8, 14, 10, 10, 8, 8]);
    assert_eq!(record.initiative, 2);

    let rats = parser().parse_markdown(RAT_SWARM).record;
    assert_eq!(rats.initiative, 0);
    assert_eq!(AbilityScores::modifier(rats.abilities.intelligence), -4);
}

#[test]
fn test_saving_throws() {
    let record = parser().parse_markdown(DRAGON).record;
    let saves: Vec<(&str, i32)> = record
        .saving_throws
        .iter()
        .map(|(k, v)| (k.as_str(), *v))
        .collect();
    assert_eq!(saves, vec![("Dex", 7), ("Con", 10), ("Wis", 6), ("Cha", 8)]);
}

#[test]
fn test_skill_qualifier() {
    let record = parser().parse_markdown(WEREWOLF).record;
    assert_eq!(record.skills.get("Perception"), Some(&4));
    assert_eq!(record.skills.get("Perception with smell"), Some(&6));
    assert_eq!(record.skills.get("Stealth"), Some(&3));
}

// =============================================================================
// Senses and Languages
// =============================================================================

#[test]
fn test_senses_and_languages() {
    let record = parser().parse_markdown(GOBLIN).record;
    assert_eq!(record.senses, vec!["Darkvision 18 m.", "Passive Perception 9"]);
    assert_eq!(record.languages, vec!["Common", "Goblin"]);
}

#[test]
fn test_senses_without_label() {
    let record = parser().parse_markdown(HOMUNCULUS).record;
    assert_eq!(record.senses, vec!["Darkvision 18 m.", "Passive Perception 10"]);
}

#[test]
fn test_cannot_speak_languages() {
    let record = parser().parse_markdown(HOMUNCULUS).record;
    assert_eq!(record.languages.len(), 2);
    assert_eq!(record.languages[0], "Cannot speak");
    assert!(record.languages[1].starts_with("Understands "));
}

#[test]
fn test_language_placeholder_is_empty() {
    let record = parser().parse_markdown(RAT_SWARM).record;
    assert!(record.languages.is_empty());
}

// =============================================================================
// Abilities and Actions
// =============================================================================

#[test]
fn test_spellcasting_ability() {
    let record = parser().parse_markdown(MAGE).record;
    assert_eq!(record.special_abilities.len(), 1);

    let spellcasting = &record.special_abilities[0];
    assert_eq!(spellcasting.name, "Spellcasting");
    let spells = spellcasting.spells.as_ref().expect("spellcasting lists spells");
    assert_eq!(spells.len(), 2);
    assert_eq!(
        spells[0],
        Action::new(
            "Cantrips (at will)",
            "fire bolt, light, mage hand, prestidigitation"
        )
    );
    assert_eq!(spells[1].name, "1st level (4 slots)");
}

#[test]
fn test_special_ability_continuation() {
    let record = parser().parse_markdown(WEREWOLF).record;
    let names: Vec<&str> = record
        .special_abilities
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(names, vec!["Shapechanger", "Keen Hearing and Smell"]);
    assert!(record.special_abilities[0]
        .description
        .ends_with("\nIt reverts to its true form if it dies, as stated in its lore."));
    assert!(record.special_abilities.iter().all(|a| a.spells.is_none()));
}

#[test]
fn test_actions_and_reactions() {
    let record = parser().parse_markdown(HOMUNCULUS).record;
    assert_eq!(record.actions.len(), 1);
    assert_eq!(record.actions[0].name, "Bite");
    assert_eq!(record.reactions.len(), 1);
    assert_eq!(record.reactions[0].name, "Telepathic Bond");
    assert!(record.special_abilities.is_empty());
}

#[test]
fn test_legendary_actions() {
    let record = parser().parse_markdown(DRAGON).record;
    assert_eq!(record.actions.len(), 1);
    assert_eq!(
        record.legendary_actions.help,
        "The dragon can take 3 legendary actions, choosing from the options below."
    );
    let names: Vec<&str> = record
        .legendary_actions
        .list
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(names, vec!["Detect", "Tail Attack"]);
}

// =============================================================================
// Fault Isolation
// =============================================================================

#[test]
fn test_broken_hit_points_leave_other_fields() {
    let extraction = parser().parse_markdown(&goblin_with_broken_hit_points());
    assert_eq!(extraction.failures.len(), 1);
    assert!(extraction.failure(Field::HitPoints).is_some());
    assert_eq!(extraction.record.hit_points, HitPoints::default());
    assert_eq!(extraction.record.armor_class[0].amount, 15);
    assert_eq!(extraction.record.actions.len(), 2);
}

#[test]
fn test_fractional_speed_is_reported() {
    let markdown = GOBLIN.replace("**Speed** 9 m.", "**Speed** 1,5 m., swim 9 m.");
    let extraction = parser().parse_markdown(&markdown);
    assert_eq!(extraction.failures.len(), 1);
    assert!(extraction.failure(Field::Speed).is_some());
    assert!(extraction.record.speed.is_empty());
    assert_eq!(extraction.record.hit_points.amount, 7);
}

#[test]
fn test_parse_all_preserves_order() {
    let nodes: Vec<_> = [GOBLIN, MAGE, DRAGON, RAT_SWARM]
        .into_iter()
        .map(node)
        .collect();
    let names: Vec<String> = parser()
        .parse_all(&nodes)
        .into_iter()
        .map(|e| e.record.name)
        .collect();
    assert_eq!(names, vec!["Goblin", "Mage", "Adult Black Dragon", "Swarm of Rats"]);
}
