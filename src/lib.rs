//! Statblock - tabletop creature stat block extraction
//!
//! Turns the marked-up text of one creature stat block into a typed
//! `MonsterRecord`: taxonomy, defenses, ability scores, senses, special
//! abilities with nested spell lists, and action lists.

pub mod config;
pub mod ingestion;


pub use config::{ConfigError, ExtractorConfig};
pub use ingestion::content_node::ContentNode;
pub use ingestion::stat_block::{Extraction, MonsterRecord, StatBlockParser};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
