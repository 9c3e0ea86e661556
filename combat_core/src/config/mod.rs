//! Battle rule configuration

mod rules;

pub use rules::{BattleRules, TurnOrder, VariationRange};
