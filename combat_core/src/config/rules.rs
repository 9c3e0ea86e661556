//! Tunable battle rules
//!
//! Every field has a serde default, so a partial `[rules]` table (or none at
//! all) deserializes to the classic rule set.

use crate::error::BuildError;
use serde::{Deserialize, Serialize};

/// Who attacks first within a round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOrder {
    /// Protagonist always strikes first
    #[default]
    ProtagonistFirst,
    /// Coin flip when the battle starts, kept for the whole battle
    Random,
    /// Both attacks are planned from the same snapshot, then committed in order
    Simultaneous,
}

/// Uniform damage variation, in tenths of the raw damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationRange {
    #[serde(default = "default_min_tenths")]
    pub min_tenths: u32,
    #[serde(default = "default_max_tenths")]
    pub max_tenths: u32,
}

impl Default for VariationRange {
    fn default() -> Self {
        VariationRange {
            min_tenths: default_min_tenths(),
            max_tenths: default_max_tenths(),
        }
    }
}

fn default_min_tenths() -> u32 {
    8
}
fn default_max_tenths() -> u32 {
    12
}

/// Rules shared by every battle of a campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleRules {
    #[serde(default)]
    pub turn_order: TurnOrder,
    /// Protagonist heals after a round while below this health
    #[serde(default = "default_heal_threshold")]
    pub heal_threshold: u32,
    /// Nominal automatic heal
    #[serde(default = "default_heal_amount")]
    pub heal_amount: u32,
    #[serde(default)]
    pub variation: VariationRange,
    /// Factor applied to the variation on a critical hit
    #[serde(default = "default_crit_factor")]
    pub crit_factor: u32,
    /// Multiplier on base power for every attack
    #[serde(default = "default_attack_multiplier")]
    pub attack_multiplier: u32,
}

impl Default for BattleRules {
    fn default() -> Self {
        BattleRules {
            turn_order: TurnOrder::default(),
            heal_threshold: default_heal_threshold(),
            heal_amount: default_heal_amount(),
            variation: VariationRange::default(),
            crit_factor: default_crit_factor(),
            attack_multiplier: default_attack_multiplier(),
        }
    }
}

fn default_heal_threshold() -> u32 {
    40
}
fn default_heal_amount() -> u32 {
    20
}
fn default_crit_factor() -> u32 {
    2
}
fn default_attack_multiplier() -> u32 {
    1
}

impl BattleRules {
    /// Same rules with a different turn order
    pub fn with_turn_order(mut self, turn_order: TurnOrder) -> Self {
        self.turn_order = turn_order;
        self
    }

    /// Reject rule sets the engine cannot run
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.variation.min_tenths > self.variation.max_tenths {
            return Err(BuildError::InvalidRules(format!(
                "variation min {} exceeds max {}",
                self.variation.min_tenths, self.variation.max_tenths
            )));
        }
        if self.variation.max_tenths == 0 {
            return Err(BuildError::InvalidRules(
                "variation max must be above zero".to_string(),
            ));
        }
        if self.crit_factor == 0 {
            return Err(BuildError::InvalidRules(
                "crit factor must be at least 1".to_string(),
            ));
        }
        if self.attack_multiplier == 0 {
            return Err(BuildError::InvalidRules(
                "attack multiplier must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
