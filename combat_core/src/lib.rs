//! combat_core - Turn-based combat resolution engine
//!
//! This library provides:
//! - Combatant: health, offensive stats, status flags and role-gated healing
//! - Damage calculation: crit roll, variation draw, shield halving
//! - Attack resolution: stun skips, minimum damage, attack events
//! - Battle: round scheduling under a turn order policy, including simultaneous rounds
//! - Campaign: a protagonist through an ordered queue of opponents
//! - Event sinks: fan-out of battle events to console and durable log
//!
//! All randomness comes from an RNG owned by the caller, so a seed reproduces a
//! whole campaign.
//!
//! # Quick Start
//!
//! ```rust
//! use combat_core::prelude::*;
//! use rand::SeedableRng;
//!
//! let hero = Combatant::protagonist("Hero").max_health(100).power(18).build()?;
//! let goblin = Combatant::opponent("Goblin").max_health(80).power(12).build()?;
//! let campaign = Campaign::new(hero, vec![goblin], BattleRules::default())?;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let mut events: Vec<BattleEvent> = Vec::new();
//! let outcome = campaign.run(&mut rng, &mut events);
//! println!("Winner: {}", outcome.winner_name());
//! # Ok::<(), combat_core::BuildError>(())
//! ```

pub mod campaign;
pub mod combat;
pub mod combatant;
pub mod config;
pub mod damage;
pub mod error;
pub mod event;
pub mod prelude;
pub mod turn;
pub mod types;

// Core API - what most users need
pub use campaign::{Campaign, EncounterSummary, Outcome};
pub use combatant::{Combatant, CombatantBuilder, Healer};
pub use config::{BattleRules, TurnOrder, VariationRange};
pub use error::{BuildError, SinkError};
pub use event::{BattleEvent, EventKind, EventSink};
pub use turn::{Battle, Initiative, Side};
pub use types::{Role, StatusFlags, Winner};
