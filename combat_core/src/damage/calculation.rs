//! Damage calculation
//!
//! Formula:
//! - raw = power * multiplier
//! - damage = floor(raw * tenths * crit_factor / 10), tenths drawn uniformly from the
//!   rule's variation range, crit_factor applied only on a critical hit
//! - shielded defender: damage = floor(damage / 2)
//!
//! All arithmetic is integral so a seed reproduces the same numbers on every platform.

use crate::config::BattleRules;
use rand::Rng;

/// Everything the calculator needs about one hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageInput {
    pub power: u32,
    /// Treated as 1 when zero
    pub multiplier: u32,
    pub is_critical: bool,
    pub defender_shielded: bool,
}

/// Crit decision and damage of a single attack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackRoll {
    pub damage: u32,
    pub critical: bool,
}

/// Bernoulli draw with success chance `crit_chance / 100`
///
/// Always consumes exactly one draw, whatever the chance.
pub fn roll_critical<R: Rng + ?Sized>(crit_chance: u8, rng: &mut R) -> bool {
    rng.gen_range(1..=100u8) <= crit_chance
}

/// Draw the variation for one hit and compute its damage
pub fn calculate_damage<R: Rng + ?Sized>(
    input: &DamageInput,
    rules: &BattleRules,
    rng: &mut R,
) -> u32 {
    let variation = rules.variation;
    let tenths = if variation.min_tenths >= variation.max_tenths {
        variation.max_tenths
    } else {
        rng.gen_range(variation.min_tenths..=variation.max_tenths)
    };
    let crit_factor = if input.is_critical {
        rules.crit_factor
    } else {
        1
    };
    scale_damage(
        input.power,
        input.multiplier,
        tenths,
        crit_factor,
        input.defender_shielded,
    )
}

/// Deterministic part of the formula, for a fixed variation draw
pub fn scale_damage(
    power: u32,
    multiplier: u32,
    tenths: u32,
    crit_factor: u32,
    defender_shielded: bool,
) -> u32 {
    let raw = u64::from(power) * u64::from(multiplier.max(1));
    let mut damage = raw * u64::from(tenths) * u64::from(crit_factor.max(1)) / 10;
    if defender_shielded {
        damage /= 2;
    }
    u32::try_from(damage).unwrap_or(u32::MAX)
}

/// Roll the crit, then the damage, for one attack
pub fn roll_attack<R: Rng + ?Sized>(
    power: u32,
    multiplier: u32,
    crit_chance: u8,
    defender_shielded: bool,
    rules: &BattleRules,
    rng: &mut R,
) -> AttackRoll {
    let critical = roll_critical(crit_chance, rng);
    let input = DamageInput {
        power,
        multiplier,
        is_critical: critical,
        defender_shielded,
    };
    AttackRoll {
        damage: calculate_damage(&input, rules, rng),
        critical,
    }
}

/// Lowest and highest non-critical, unshielded damage for `power`
pub fn damage_bounds(power: u32, rules: &BattleRules) -> (u32, u32) {
    let min = scale_damage(
        power,
        rules.attack_multiplier,
        rules.variation.min_tenths,
        1,
        false,
    );
    let max = scale_damage(
        power,
        rules.attack_multiplier,
        rules.variation.max_tenths,
        1,
        false,
    );
    (min, max)
}
