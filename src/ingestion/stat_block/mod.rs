//! Stat Block Parsing Module
//!
//! Parses one creature stat block, already resolved into a [`ContentNode`],
//! into a [`MonsterRecord`].
//!
//! Every field is extracted on its own. A missing label leaves the field at
//! its empty value; a malformed field is reported in
//! [`Extraction::failures`] and also left empty, while the remaining fields
//! are still extracted.
//!
//! # Example
//!
//! ```ignore
//! use statblock::ingestion::stat_block::StatBlockParser;
//!
//! let parser = StatBlockParser::new();
//! let extraction = parser.parse_markdown(markdown);
//! println!("{} has AC {:?}", extraction.record.name, extraction.record.armor_class);
//! ```

pub mod abilities;
pub mod defense;
pub mod error;
pub mod features;
pub mod fields;
pub mod senses;
pub mod speed;
pub mod taxonomy;
pub mod types;

use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, ExtractorConfig};
use crate::ingestion::content_node::ContentNode;

pub use error::{Field, FieldError, FieldFailure, FieldResult};
pub use types::{
    AbilityScores, Action, ArmorClassEntry, HitPoints, LegendaryActions, ModifierMap,
    MonsterRecord, SpecialAbility, SpeedMap, Spell,
};

use taxonomy::Taxonomy;

// ============================================================================
// Types
// ============================================================================

/// A record together with the fields that could not be extracted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub record: MonsterRecord,
    pub failures: Vec<FieldFailure>,
}

impl Extraction {
    /// Whether every field was extracted without a malformed-field failure.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failure(&self, field: Field) -> Option<&FieldFailure> {
        self.failures.iter().find(|f| f.field == field)
    }
}

/// Collects per-field results, turning errors into empty values.
struct FieldResolver {
    failures: Vec<FieldFailure>,
}

impl FieldResolver {
    fn new() -> Self {
        Self {
            failures: Vec::new(),
        }
    }

    fn resolve<T: Default>(&mut self, field: Field, result: FieldResult<T>) -> T {
        match result {
            Ok(value) => value,
            Err(FieldError::MissingLabel { label }) => {
                log::debug!("No `{label}` label; leaving {field} empty");
                T::default()
            }
            Err(err) => {
                self.failures.push(FieldFailure::new(field, &err));
                T::default()
            }
        }
    }
}

// ============================================================================
// Parser
// ============================================================================

/// Extracts [`MonsterRecord`]s from stat block content nodes.
#[derive(Debug, Clone)]
pub struct StatBlockParser {
    config: ExtractorConfig,
    spellcasting: Regex,
}

impl Default for StatBlockParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StatBlockParser {
    /// Create a parser with the default English labels.
    pub fn new() -> Self {
        let config = ExtractorConfig::default();
        let spellcasting = Regex::new(&config.grammar.spellcasting_pattern)
            .expect("Failed to compile spellcasting regex");
        Self {
            config,
            spellcasting,
        }
    }

    /// Create a parser from a custom configuration.
    pub fn with_config(config: ExtractorConfig) -> Result<Self, ConfigError> {
        let pattern = &config.grammar.spellcasting_pattern;
        let spellcasting = Regex::new(pattern).map_err(|source| ConfigError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;
        Ok(Self {
            config,
            spellcasting,
        })
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Parse a stat block written in Markdown.
    pub fn parse_markdown(&self, markdown: &str) -> Extraction {
        self.parse(&ContentNode::from_markdown(markdown))
    }

    /// Parse independent stat blocks in parallel, preserving input order.
    pub fn parse_all(&self, nodes: &[ContentNode]) -> Vec<Extraction> {
        nodes.par_iter().map(|node| self.parse(node)).collect()
    }

    /// Parse one stat block.
    pub fn parse(&self, node: &ContentNode) -> Extraction {
        let labels = &self.config.labels;
        let grammar = &self.config.grammar;
        let sections = labels.section_labels();
        let mut resolver = FieldResolver::new();

        let name = resolver.resolve(Field::Name, taxonomy::extract_name(node));
        let Taxonomy {
            alignment,
            size,
            creature_type,
            tags,
        } = resolver.resolve(
            Field::Taxonomy,
            taxonomy::extract_taxonomy(node, &grammar.swarm_keyword),
        );

        let record = MonsterRecord {
            alignment,
            size,
            creature_type,
            tags,
            description: resolver.resolve(
                Field::Description,
                taxonomy::extract_description(node, &labels.armor_class),
            ),
            armor_class: resolver.resolve(
                Field::ArmorClass,
                defense::extract_armor_class(node, &labels.armor_class),
            ),
            hit_points: resolver.resolve(
                Field::HitPoints,
                defense::extract_hit_points(node, &labels.hit_points),
            ),
            speed: resolver.resolve(
                Field::Speed,
                speed::extract_speed(node, &labels.speed, &grammar.walking_mode),
            ),
            abilities: resolver.resolve(Field::Abilities, abilities::extract_abilities(node)),
            initiative: resolver.resolve(
                Field::Initiative,
                abilities::extract_initiative(node, grammar.initiative_column),
            ),
            saving_throws: abilities::extract_saving_throws(node, &labels.saving_throws),
            skills: abilities::extract_skills(node, &labels.skills),
            vulnerabilities: defense::extract_damage_list(node, &labels.damage_vulnerabilities),
            resistances: defense::extract_damage_list(node, &labels.damage_resistances),
            immunities: defense::extract_damage_list(node, &labels.damage_immunities),
            condition_immunities: defense::extract_condition_immunities(
                node,
                &labels.condition_immunities,
            ),
            senses: resolver.resolve(
                Field::Senses,
                senses::extract_senses(node, &labels.senses, &labels.languages),
            ),
            languages: resolver.resolve(
                Field::Languages,
                senses::extract_languages(node, &labels.languages, &labels.senses),
            ),
            challenge_rating: resolver.resolve(
                Field::ChallengeRating,
                fields::require(node, &labels.challenge).map(|f| f.text),
            ),
            special_abilities: resolver.resolve(
                Field::SpecialAbilities,
                features::extract_special_abilities(
                    node,
                    &labels.challenge,
                    &sections,
                    &self.spellcasting,
                ),
            ),
            actions: features::extract_actions(node, &labels.actions, &sections),
            bonus_actions: features::extract_actions(node, &labels.bonus_actions, &sections),
            reactions: features::extract_actions(node, &labels.reactions, &sections),
            legendary_actions: features::extract_legendary_actions(
                node,
                &labels.legendary_actions,
                &sections,
            )
            .unwrap_or_default(),
            name,
        };

        for failure in &resolver.failures {
            log::warn!(
                "Stat block `{}`: {} ({})",
                record.name,
                failure.message,
                failure.field
            );
        }

        Extraction {
            record,
            failures: resolver.failures,
        }
    }
}
