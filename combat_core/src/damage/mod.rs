//! Damage system - turning attacker stats and a random draw into a damage amount

mod calculation;

pub use calculation::{
    calculate_damage, damage_bounds, roll_attack, roll_critical, scale_damage, AttackRoll,
    DamageInput,
};
