use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors raised while loading or compiling an extractor configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Top-level extractor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub labels: Labels,
    pub grammar: GrammarConfig,
}

/// Label phrases as they appear in bold in the source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub armor_class: String,
    pub hit_points: String,
    pub speed: String,
    pub saving_throws: String,
    pub skills: String,
    pub damage_vulnerabilities: String,
    pub damage_resistances: String,
    pub damage_immunities: String,
    pub condition_immunities: String,
    pub senses: String,
    pub languages: String,
    pub challenge: String,
    pub actions: String,
    pub bonus_actions: String,
    pub reactions: String,
    pub legendary_actions: String,
}

/// Source-language vocabulary used by the field grammars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrammarConfig {
    /// Movement mode assumed when a speed segment names none.
    pub walking_mode: String,
    /// Leading word of the swarm subtitle form.
    pub swarm_keyword: String,
    /// Regex matched against special ability names to detect spellcasting.
    pub spellcasting_pattern: String,
    /// Table column whose modifier is the initiative bonus.
    pub initiative_column: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            labels: Labels::default(),
            grammar: GrammarConfig::default(),
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            armor_class: "Armor Class".to_string(),
            hit_points: "Hit Points".to_string(),
            speed: "Speed".to_string(),
            saving_throws: "Saving Throws".to_string(),
            skills: "Skills".to_string(),
            damage_vulnerabilities: "Damage Vulnerabilities".to_string(),
            damage_resistances: "Damage Resistances".to_string(),
            damage_immunities: "Damage Immunities".to_string(),
            condition_immunities: "Condition Immunities".to_string(),
            senses: "Senses".to_string(),
            languages: "Languages".to_string(),
            challenge: "Challenge".to_string(),
            actions: "Actions".to_string(),
            bonus_actions: "Bonus Actions".to_string(),
            reactions: "Reactions".to_string(),
            legendary_actions: "Legendary Actions".to_string(),
        }
    }
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            walking_mode: "walking".to_string(),
            swarm_keyword: "Swarm".to_string(),
            spellcasting_pattern: r"(?i)spellcasting".to_string(),
            initiative_column: 1,
        }
    }
}

impl Labels {
    /// Labels that open a block section (actions and friends).
    pub fn section_labels(&self) -> [&str; 4] {
        [
            self.actions.as_str(),
            self.bonus_actions.as_str(),
            self.reactions.as_str(),
            self.legendary_actions.as_str(),
        ]
    }
}

impl ExtractorConfig {
    /// Parse a configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        log::info!("Loaded extractor config from {}", path.display());
        Ok(config)
    }

    /// Load a configuration file, falling back to defaults when it is missing
    /// or unparseable.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Io(_)) => {
                log::debug!("No config file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!(
                    "Failed to load config at {}: {e}; using defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }
}
