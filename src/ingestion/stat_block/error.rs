//! Field extraction errors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result type alias using [`FieldError`].
pub type FieldResult<T> = std::result::Result<T, FieldError>;

/// Record fields, named by their serialized key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Taxonomy,
    Description,
    ArmorClass,
    HitPoints,
    Speed,
    Abilities,
    Initiative,
    SavingThrows,
    Skills,
    Vulnerabilities,
    Resistances,
    Immunities,
    ConditionImmunities,
    Senses,
    Languages,
    ChallengeRating,
    SpecialAbilities,
    Actions,
    BonusActions,
    Reactions,
    LegendaryActions,
}

impl Field {
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Taxonomy => "taxonomy",
            Field::Description => "description",
            Field::ArmorClass => "armorClass",
            Field::HitPoints => "hitPoints",
            Field::Speed => "speed",
            Field::Abilities => "abilities",
            Field::Initiative => "initiative",
            Field::SavingThrows => "savingThrows",
            Field::Skills => "skills",
            Field::Vulnerabilities => "vulnerabilities",
            Field::Resistances => "resistances",
            Field::Immunities => "immunities",
            Field::ConditionImmunities => "conditionImmunities",
            Field::Senses => "senses",
            Field::Languages => "languages",
            Field::ChallengeRating => "challengeRating",
            Field::SpecialAbilities => "specialAbilities",
            Field::Actions => "actions",
            Field::BonusActions => "bonusActions",
            Field::Reactions => "reactions",
            Field::LegendaryActions => "legendaryActions",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Errors a single field extractor can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The field's label is not in the stat block.
    #[error("label `{label}` not found")]
    MissingLabel { label: String },

    /// The label is present but its text does not fit the field grammar.
    #[error("malformed {field}: {reason}")]
    MalformedField { field: Field, reason: String },
}

impl FieldError {
    pub fn missing(label: impl Into<String>) -> Self {
        FieldError::MissingLabel {
            label: label.into(),
        }
    }

    pub fn malformed(field: Field, reason: impl Into<String>) -> Self {
        FieldError::MalformedField {
            field,
            reason: reason.into(),
        }
    }
}

/// A field that could not be extracted, reported next to the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFailure {
    pub field: Field,
    pub message: String,
}

impl FieldFailure {
    pub fn new(field: Field, error: &FieldError) -> Self {
        Self {
            field,
            message: error.to_string(),
        }
    }
}
