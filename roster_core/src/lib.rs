//! roster_core - Campaign rosters for combat_core
//!
//! Loads the protagonist, inventory, opponent queue and battle rules from a TOML
//! file, or provides the classic Hero-versus-Goblin/Orc/Troll lineup.

mod config;
mod inventory;
mod roster;

pub use config::{CombatantConfig, OpponentConfig, ProtagonistConfig, RosterFile};
pub use inventory::Inventory;
pub use roster::Roster;

use combat_core::BuildError;
use std::path::PathBuf;
use thiserror::Error;

/// Error loading or building a roster
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path}': {error}")]
    Parse {
        error: toml::de::Error,
        path: PathBuf,
    },
    #[error("Validation error in '{path}': {message}")]
    Validation { message: String, path: PathBuf },
    #[error("Could not build campaign: {0}")]
    Build(#[from] BuildError),
}
