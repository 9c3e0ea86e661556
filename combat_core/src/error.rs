//! Error types for building combatants, rules and campaigns, and for event delivery

use crate::types::Role;
use std::path::PathBuf;
use thiserror::Error;

/// A combatant, rule set or campaign could not be constructed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Combatant name must not be empty")]
    EmptyName,
    #[error("'{name}' must have a max health above zero")]
    ZeroMaxHealth { name: String },
    #[error("'{name}' must have a base power above zero")]
    ZeroPower { name: String },
    #[error("'{name}' has crit chance {value}%, must be within 0-100")]
    CritChanceOutOfRange { name: String, value: u8 },
    #[error("'{name}' starts at {current} health, above its max of {max}")]
    HealthAboveMax { name: String, current: u32, max: u32 },
    #[error("'{name}' is a {actual} but was queued as a {expected}")]
    RoleMismatch {
        name: String,
        expected: Role,
        actual: Role,
    },
    #[error("Invalid battle rules: {0}")]
    InvalidRules(String),
}

/// A destination refused a battle event
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error writing '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
}
