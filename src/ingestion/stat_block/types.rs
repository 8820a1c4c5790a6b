//! Stat block record types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Movement mode → distance, in source order.
pub type SpeedMap = IndexMap<String, i32>;

/// Short name → signed modifier (saving throws, skills).
pub type ModifierMap = IndexMap<String, i32>;

/// Parsed stat block with every extracted field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonsterRecord {
    pub name: String,
    pub alignment: String,
    /// Size category (Tiny, Small, Medium, Large, Huge, Gargantuan)
    pub size: String,
    /// Creature type (humanoid, undead, dragon, etc.)
    #[serde(rename = "type")]
    pub creature_type: String,
    pub tags: Vec<String>,
    /// Flavor text between the subtitle and the defenses
    pub description: String,
    pub armor_class: Vec<ArmorClassEntry>,
    pub hit_points: HitPoints,
    pub speed: SpeedMap,
    pub abilities: AbilityScores,
    pub initiative: i32,
    pub saving_throws: ModifierMap,
    pub skills: ModifierMap,
    pub vulnerabilities: Vec<String>,
    pub resistances: Vec<String>,
    pub immunities: Vec<String>,
    pub condition_immunities: Vec<String>,
    pub senses: Vec<String>,
    pub languages: Vec<String>,
    pub challenge_rating: String,
    pub special_abilities: Vec<SpecialAbility>,
    pub actions: Vec<Action>,
    pub bonus_actions: Vec<Action>,
    pub reactions: Vec<Action>,
    pub legendary_actions: LegendaryActions,
}

/// Armor Class value with optional armor type and condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorClassEntry {
    pub amount: u32,
    #[serde(rename = "type")]
    pub armor_type: String,
    pub condition: String,
}

impl ArmorClassEntry {
    pub fn new(amount: u32, armor_type: impl Into<String>, condition: impl Into<String>) -> Self {
        Self {
            amount,
            armor_type: armor_type.into(),
            condition: condition.into(),
        }
    }
}

/// Hit Points with dice formula.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitPoints {
    pub amount: u32,
    pub dice: String,
}

/// Six ability scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl AbilityScores {
    /// Build from scores in STR, DEX, CON, INT, WIS, CHA order.
    pub fn from_array(scores: [i32; 6]) -> Self {
        let [strength, dexterity, constitution, intelligence, wisdom, charisma] = scores;
        Self {
            strength,
            dexterity,
            constitution,
            intelligence,
            wisdom,
            charisma,
        }
    }

    /// Scores in STR, DEX, CON, INT, WIS, CHA order.
    pub fn to_array(&self) -> [i32; 6] {
        [
            self.strength,
            self.dexterity,
            self.constitution,
            self.intelligence,
            self.wisdom,
            self.charisma,
        ]
    }

    /// Calculate modifier from ability score.
    pub fn modifier(score: i32) -> i32 {
        (score - 10).div_euclid(2)
    }

    /// Get a score by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<i32> {
        match name.to_lowercase().as_str() {
            "str" | "strength" => Some(self.strength),
            "dex" | "dexterity" => Some(self.dexterity),
            "con" | "constitution" => Some(self.constitution),
            "int" | "intelligence" => Some(self.intelligence),
            "wis" | "wisdom" => Some(self.wisdom),
            "cha" | "charisma" => Some(self.charisma),
            _ => None,
        }
    }
}

/// A named entry with free-text description: actions, reactions, legendary
/// actions and spells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    pub description: String,
}

impl Action {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Alias used for entries nested under a spellcasting ability.
pub type Spell = Action;

/// A passive trait. `spells` is present only for spellcasting abilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialAbility {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spells: Option<Vec<Spell>>,
}

/// Legendary actions with their introductory text. Serializes as `{}` when
/// the creature has none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendaryActions {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub list: Vec<Action>,
}

impl LegendaryActions {
    pub fn is_empty(&self) -> bool {
        self.help.is_empty() && self.list.is_empty()
    }
}
