//! Special abilities and action lists.
//!
//! Special abilities sit between the challenge line and the first section
//! header. Each block is classified by its leading emphasis:
//!
//! | leading run     | `Idle`                | `InSpellcastingAbility`   |
//! |-----------------|-----------------------|---------------------------|
//! | bold + italic   | new ability           | new ability               |
//! | bold            | new ability           | spell of current ability  |
//! | none            | continues description | continues description     |
//!
//! A new ability moves the scan to `InSpellcastingAbility` when its name
//! matches the spellcasting pattern, and back to `Idle` otherwise. A block
//! made of a single run, seen once an ability exists, ends the region.

use regex::Regex;

use crate::ingestion::content_node::{ContentNode, Emphasis, Paragraph};

use super::error::{FieldError, FieldResult};
use super::fields::{clean_text, entry_name, find_label, label_matches};
use super::types::{Action, LegendaryActions, SpecialAbility};

// ============================================================================
// Section boundaries
// ============================================================================

/// Whether the paragraph opens one of the block sections (`Actions`, ...).
pub fn is_section_header(paragraph: &Paragraph, section_labels: &[&str]) -> bool {
    paragraph.leading_run().is_some_and(|run| {
        run.emphasis.is_bold() && section_labels.iter().any(|l| label_matches(&run.text, l))
    })
}

/// Index of the first section header at or after `from`, or the paragraph
/// count when there is none.
fn next_section(node: &ContentNode, from: usize, section_labels: &[&str]) -> usize {
    node.paragraphs()
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, p)| is_section_header(p, section_labels))
        .map_or(node.paragraphs().len(), |(index, _)| index)
}

fn leading_emphasis(paragraph: &Paragraph) -> Emphasis {
    paragraph
        .leading_run()
        .map_or(Emphasis::Plain, |run| run.emphasis)
}

fn append_line(description: &mut String, paragraph: &Paragraph) {
    let line = clean_text(&paragraph.text());
    if line.is_empty() {
        return;
    }
    if !description.is_empty() {
        description.push('\n');
    }
    description.push_str(&line);
}

// ============================================================================
// Special Abilities
// ============================================================================

/// Scan state of the special-ability extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Idle,
    InSpellcastingAbility,
}

/// Special abilities between the challenge label and the next section.
pub fn extract_special_abilities(
    node: &ContentNode,
    challenge_label: &str,
    section_labels: &[&str],
    spellcasting: &Regex,
) -> FieldResult<Vec<SpecialAbility>> {
    let Some(challenge) = find_label(node, challenge_label) else {
        return Err(FieldError::missing(challenge_label));
    };
    let start = challenge + 1;
    let end = next_section(node, start, section_labels);

    let mut abilities: Vec<SpecialAbility> = Vec::new();
    let mut state = ScanState::Idle;

    for paragraph in &node.paragraphs()[start..end] {
        if paragraph.content_run_count() == 1 && !abilities.is_empty() {
            log::debug!("Special abilities end before `{}`", clean_text(&paragraph.text()));
            break;
        }

        let name = || paragraph.leading_run().map(|r| entry_name(&r.text)).unwrap_or_default();
        let description = || clean_text(&paragraph.text_after_leading());

        match (leading_emphasis(paragraph), state) {
            (Emphasis::BoldItalic, _) => {
                let name = name();
                let is_caster = spellcasting.is_match(&name);
                state = if is_caster {
                    ScanState::InSpellcastingAbility
                } else {
                    ScanState::Idle
                };
                abilities.push(SpecialAbility {
                    name,
                    description: description(),
                    spells: is_caster.then(Vec::new),
                });
            }
            (Emphasis::Bold, ScanState::InSpellcastingAbility) => {
                if let Some(spells) = abilities.last_mut().and_then(|a| a.spells.as_mut()) {
                    spells.push(Action::new(name(), description()));
                }
            }
            (Emphasis::Bold, ScanState::Idle) => {
                abilities.push(SpecialAbility {
                    name: name(),
                    description: description(),
                    spells: None,
                });
            }
            (Emphasis::Plain | Emphasis::Italic, _) => match abilities.last_mut() {
                Some(ability) => append_line(&mut ability.description, paragraph),
                None => log::debug!(
                    "Skipping text before the first special ability: `{}`",
                    clean_text(&paragraph.text())
                ),
            },
        }
    }

    Ok(abilities)
}

// ============================================================================
// Action Lists
// ============================================================================

/// Entries of one block section plus any text before the first entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionSection {
    pub help: String,
    pub entries: Vec<Action>,
}

/// Parse the section opened by `label`. `None` when the label is absent.
///
/// Text before the first entry is kept as `help` only when `with_help` is
/// set; otherwise it is skipped.
pub fn parse_action_section(
    node: &ContentNode,
    label: &str,
    section_labels: &[&str],
    with_help: bool,
) -> Option<ActionSection> {
    let header = node
        .paragraphs()
        .iter()
        .position(|p| is_section_header(p, &[label]))?;
    let start = header + 1;
    let end = next_section(node, start, section_labels);

    let mut section = ActionSection::default();
    for paragraph in &node.paragraphs()[start..end] {
        if leading_emphasis(paragraph).is_bold() {
            let name = paragraph
                .leading_run()
                .map(|r| entry_name(&r.text))
                .unwrap_or_default();
            section
                .entries
                .push(Action::new(name, clean_text(&paragraph.text_after_leading())));
        } else if let Some(entry) = section.entries.last_mut() {
            append_line(&mut entry.description, paragraph);
        } else if with_help {
            append_line(&mut section.help, paragraph);
        } else {
            log::debug!(
                "Skipping text before the first `{label}` entry: `{}`",
                clean_text(&paragraph.text())
            );
        }
    }
    Some(section)
}

/// Actions, bonus actions or reactions. Empty when the section is absent.
pub fn extract_actions(node: &ContentNode, label: &str, section_labels: &[&str]) -> Vec<Action> {
    parse_action_section(node, label, section_labels, false)
        .map(|section| section.entries)
        .unwrap_or_default()
}

/// Legendary actions. `None` when the section is absent or lists no entry.
pub fn extract_legendary_actions(
    node: &ContentNode,
    label: &str,
    section_labels: &[&str],
) -> Option<LegendaryActions> {
    let section = parse_action_section(node, label, section_labels, true)?;
    if section.entries.is_empty() {
        return None;
    }
    Some(LegendaryActions {
        help: section.help,
        list: section.entries,
    })
}
