//! Combat - resolving single attacks between two combatants

mod resolution;

pub use resolution::{
    commit_attack, plan_attack, resolve_attack, AttackResolution, PlannedAttack,
    MIN_DAMAGE_VS_LIVING,
};
