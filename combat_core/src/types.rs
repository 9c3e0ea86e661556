//! Shared value types: roles, status flags and campaign winners

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of a campaign a combatant fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Protagonist,
    Opponent,
}

/// Role-only abilities, looked up instead of overriding behavior per role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleCapabilities {
    /// May receive the automatic post-round heal
    pub can_heal: bool,
    /// Adverb in the console line announcing an attack
    pub attack_verb: &'static str,
}

impl Role {
    /// Capability table for this role
    pub fn capabilities(self) -> RoleCapabilities {
        match self {
            Role::Protagonist => RoleCapabilities {
                can_heal: true,
                attack_verb: "bravely",
            },
            Role::Opponent => RoleCapabilities {
                can_heal: false,
                attack_verb: "fiercely",
            },
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Protagonist => write!(f, "Protagonist"),
            Role::Opponent => write!(f, "Opponent"),
        }
    }
}

/// Transient combat statuses
///
/// `poisoned` is carried as state only; no rule reads or sets it yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFlags {
    /// Skips the next attack opportunity, then clears
    pub stunned: bool,
    /// Halves incoming damage while set
    pub shielded: bool,
    pub poisoned: bool,
}

/// Side that won a campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Protagonist,
    Opponents,
}
