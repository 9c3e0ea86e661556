//! Battle events and their delivery
//!
//! The engine produces [`BattleEvent`]s in the exact order effects happen. Callers
//! receive them through an [`EventSink`], usually a [`Broadcast`] fanning out to a
//! console and a durable log.

mod destination;
mod sink;

pub use destination::{ConsoleLog, FileLog, DEFAULT_LOG_PATH};
pub use sink::{Broadcast, Destination, EventSink, NullSink};

use crate::combatant::Combatant;
use crate::types::Role;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind tag of a [`BattleEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Attack,
    Heal,
    Status,
    Stunned,
    EncounterStarted,
    RoundEnded,
}

/// Immutable record of something that happened in a battle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BattleEvent {
    Attack {
        actor: String,
        /// Role of the attacker
        role: Role,
        target: String,
        amount: u32,
        critical: bool,
        /// Target was shielded when the hit landed
        blocked: bool,
    },
    Heal {
        actor: String,
        /// Health actually restored
        amount: u32,
    },
    Status {
        actor: String,
        level: u8,
        health: u32,
        max_health: u32,
    },
    Stunned {
        actor: String,
    },
    /// A battle against `opponent` is about to begin
    EncounterStarted {
        opponent: String,
    },
    /// Round `round` finished with both sides still standing
    RoundEnded {
        round: u32,
    },
}

impl BattleEvent {
    /// Snapshot of a combatant's level and health
    pub fn status_of(combatant: &Combatant) -> Self {
        BattleEvent::Status {
            actor: combatant.name().to_string(),
            level: combatant.level(),
            health: combatant.current_health(),
            max_health: combatant.max_health(),
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            BattleEvent::Attack { .. } => EventKind::Attack,
            BattleEvent::Heal { .. } => EventKind::Heal,
            BattleEvent::Status { .. } => EventKind::Status,
            BattleEvent::Stunned { .. } => EventKind::Stunned,
            BattleEvent::EncounterStarted { .. } => EventKind::EncounterStarted,
            BattleEvent::RoundEnded { .. } => EventKind::RoundEnded,
        }
    }

    /// Combatant the event is about; round markers have none
    pub fn actor(&self) -> Option<&str> {
        match self {
            BattleEvent::Attack { actor, .. }
            | BattleEvent::Heal { actor, .. }
            | BattleEvent::Status { actor, .. }
            | BattleEvent::Stunned { actor } => Some(actor),
            BattleEvent::EncounterStarted { opponent } => Some(opponent),
            BattleEvent::RoundEnded { .. } => None,
        }
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            BattleEvent::Attack { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn amount(&self) -> Option<u32> {
        match self {
            BattleEvent::Attack { amount, .. } | BattleEvent::Heal { amount, .. } => Some(*amount),
            _ => None,
        }
    }

    /// Whether the event names `name` as actor or target
    pub fn involves(&self, name: &str) -> bool {
        self.actor() == Some(name) || self.target() == Some(name)
    }

    /// Whether the event belongs in the durable log
    pub fn is_durable(&self) -> bool {
        matches!(self, BattleEvent::Attack { .. } | BattleEvent::Status { .. })
    }
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEvent::Attack {
                actor,
                target,
                amount,
                critical,
                blocked,
                ..
            } => {
                write!(f, "{} attacks {} for {} damage", actor, target, amount)?;
                if *critical {
                    write!(f, " (CRITICAL HIT!)")?;
                }
                if *blocked {
                    write!(f, " [Blocked by shield]")?;
                }
                Ok(())
            }
            BattleEvent::Heal { actor, amount } => write!(f, "{} heals for {} HP!", actor, amount),
            BattleEvent::Status {
                actor,
                level,
                health,
                max_health,
            } => write!(
                f,
                "[LOG] {} (Lv {}) HP: {}/{}",
                actor, level, health, max_health
            ),
            BattleEvent::Stunned { actor } => write!(f, "{} is stunned and cannot attack!", actor),
            BattleEvent::EncounterStarted { opponent } => write!(f, "Next battle: {}", opponent),
            BattleEvent::RoundEnded { .. } => write!(f, "--------------------"),
        }
    }
}
