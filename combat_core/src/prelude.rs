//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Core types
pub use crate::combatant::{Combatant, CombatantBuilder};
pub use crate::types::{Role, StatusFlags, Winner};

// Rules
pub use crate::config::{BattleRules, TurnOrder};

// Battles and campaigns
pub use crate::campaign::{Campaign, Outcome};
pub use crate::turn::{Battle, Side};

// Events
pub use crate::event::{BattleEvent, Broadcast, ConsoleLog, EventSink, FileLog};

// Errors
pub use crate::error::BuildError;
