//! Serde layout of roster TOML files

use combat_core::BattleRules;
use serde::{Deserialize, Serialize};

/// TOML layout of a roster file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterFile {
    #[serde(default)]
    pub rules: BattleRules,
    pub protagonist: ProtagonistConfig,
    #[serde(default)]
    pub opponents: Vec<OpponentConfig>,
}

/// Stats shared by every combatant entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantConfig {
    pub name: String,
    pub health: u32,
    pub power: u32,
    #[serde(default = "default_level")]
    pub level: u8,
    #[serde(default = "default_crit_chance")]
    pub crit_chance: u8,
}

/// An opponent entry; stats left out come from the default opponent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crit_chance: Option<u8>,
}

impl OpponentConfig {
    /// Fill unset stats from `template`
    pub fn resolve(self, template: &CombatantConfig) -> CombatantConfig {
        CombatantConfig {
            name: self.name,
            health: self.health.unwrap_or(template.health),
            power: self.power.unwrap_or(template.power),
            level: self.level.unwrap_or(template.level),
            crit_chance: self.crit_chance.unwrap_or(template.crit_chance),
        }
    }
}

/// The protagonist entry, with its starting inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtagonistConfig {
    #[serde(flatten)]
    pub stats: CombatantConfig,
    #[serde(default)]
    pub inventory: Vec<String>,
}

fn default_level() -> u8 {
    1
}
fn default_crit_chance() -> u8 {
    10
}
