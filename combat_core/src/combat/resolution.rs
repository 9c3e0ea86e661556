//! Attack resolution - stun, critical hits and shields
//!
//! An attack is split into a pure planning step, which only reads both
//! combatants and draws from the RNG, and a commit step that mutates them.
//! Sequential rounds run both back to back through [`resolve_attack`];
//! simultaneous rounds plan both attacks from the same snapshot first.

use crate::combatant::Combatant;
use crate::config::BattleRules;
use crate::damage::roll_attack;
use crate::event::BattleEvent;
use rand::Rng;

/// Smallest damage a hit deals to a living defender, so every battle ends
pub const MIN_DAMAGE_VS_LIVING: u32 = 1;

/// Outcome of planning one attack opportunity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedAttack {
    /// Attacker was stunned and loses this opportunity
    Stunned,
    Hit {
        damage: u32,
        critical: bool,
        blocked: bool,
    },
}

impl PlannedAttack {
    pub fn damage(&self) -> u32 {
        match self {
            PlannedAttack::Stunned => 0,
            PlannedAttack::Hit { damage, .. } => *damage,
        }
    }
}

/// Committed result of one attack opportunity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackResolution {
    /// Damage dealt (0 when the attacker was stunned)
    pub damage: u32,
    /// The Attack or Stunned event for this opportunity
    pub events: Vec<BattleEvent>,
}

/// Decide what an attack would do without touching either combatant
///
/// Draws nothing when the attacker is stunned; otherwise the crit draw comes
/// first, then the damage variation.
pub fn plan_attack<R: Rng + ?Sized>(
    attacker: &Combatant,
    defender: &Combatant,
    multiplier: u32,
    rules: &BattleRules,
    rng: &mut R,
) -> PlannedAttack {
    if attacker.status.stunned {
        return PlannedAttack::Stunned;
    }

    let blocked = defender.status.shielded;
    let roll = roll_attack(
        attacker.base_power(),
        multiplier,
        attacker.crit_chance(),
        blocked,
        rules,
        rng,
    );

    let damage = if defender.is_alive() {
        roll.damage.max(MIN_DAMAGE_VS_LIVING)
    } else {
        roll.damage
    };

    PlannedAttack::Hit {
        damage,
        critical: roll.critical,
        blocked,
    }
}

/// Apply a planned attack: clear a consumed stun, or subtract health
pub fn commit_attack(
    plan: PlannedAttack,
    attacker: &mut Combatant,
    defender: &mut Combatant,
) -> AttackResolution {
    match plan {
        PlannedAttack::Stunned => {
            attacker.status.stunned = false;
            AttackResolution {
                damage: 0,
                events: vec![BattleEvent::Stunned {
                    actor: attacker.name().to_string(),
                }],
            }
        }
        PlannedAttack::Hit {
            damage,
            critical,
            blocked,
        } => {
            defender.take_damage(damage);
            AttackResolution {
                damage,
                events: vec![BattleEvent::Attack {
                    actor: attacker.name().to_string(),
                    role: attacker.role(),
                    target: defender.name().to_string(),
                    amount: damage,
                    critical,
                    blocked,
                }],
            }
        }
    }
}

/// Plan and commit one attack
pub fn resolve_attack<R: Rng + ?Sized>(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    multiplier: u32,
    rules: &BattleRules,
    rng: &mut R,
) -> AttackResolution {
    let plan = plan_attack(attacker, defender, multiplier, rules, rng);
    commit_attack(plan, attacker, defender)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use crate::types::Role;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn make_test_rng() -> StdRng {
        StdRng::seed_from_u64(12345)
    }

    fn hero(crit_chance: u8) -> Combatant {
        Combatant::protagonist("Hero")
            .max_health(100)
            .power(18)
            .crit_chance(crit_chance)
            .build()
            .unwrap()
    }

    fn goblin() -> Combatant {
        Combatant::opponent("Goblin")
            .max_health(80)
            .power(12)
            .crit_chance(0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_basic_attack() {
        let rules = BattleRules::default();
        let mut rng = make_test_rng();
        let mut hero = hero(0);
        let mut goblin = goblin();

        let result = resolve_attack(&mut hero, &mut goblin, 1, &rules, &mut rng);

        assert!((14..=21).contains(&result.damage));
        assert_eq!(goblin.current_health(), 80 - result.damage);
        assert_eq!(result.events.len(), 1);
        assert_eq!(
            result.events[0],
            BattleEvent::Attack {
                actor: "Hero".to_string(),
                role: Role::Protagonist,
                target: "Goblin".to_string(),
                amount: result.damage,
                critical: false,
                blocked: false,
            }
        );
    }

    #[test]
    fn test_stun_skips_exactly_one_opportunity() {
        let rules = BattleRules::default();
        let mut rng = make_test_rng();
        let mut hero = hero(0);
        let mut goblin = goblin();
        goblin.status.stunned = true;

        let skipped = resolve_attack(&mut goblin, &mut hero, 1, &rules, &mut rng);
        assert_eq!(skipped.damage, 0);
        assert_eq!(skipped.events[0].kind(), EventKind::Stunned);
        assert_eq!(hero.current_health(), 100);
        assert!(!goblin.status.stunned);

        let landed = resolve_attack(&mut goblin, &mut hero, 1, &rules, &mut rng);
        assert!(landed.damage > 0);
        assert_eq!(landed.events[0].kind(), EventKind::Attack);
        assert_eq!(hero.current_health(), 100 - landed.damage);
    }

    #[test]
    fn test_stunned_plan_draws_nothing() {
        let rules = BattleRules::default();
        let mut hero = hero(50);
        hero.status.stunned = true;
        let goblin = goblin();

        let mut rng = make_test_rng();
        let plan = plan_attack(&hero, &goblin, 1, &rules, &mut rng);
        assert_eq!(plan, PlannedAttack::Stunned);

        let mut untouched = make_test_rng();
        assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
    }

    #[test]
    fn test_shielded_defender_marks_block() {
        let rules = BattleRules::default();
        let mut rng = make_test_rng();
        let mut hero = hero(0);
        let mut goblin = goblin();
        goblin.status.shielded = true;

        let result = resolve_attack(&mut hero, &mut goblin, 1, &rules, &mut rng);

        // 18 * 0.8..1.2 halved
        assert!((7..=10).contains(&result.damage));
        assert!(result.events[0]
            .to_string()
            .ends_with("[Blocked by shield]"));
        // Shield is not consumed by a hit
        assert!(goblin.status.shielded);
    }

    #[test]
    fn test_min_damage_against_living_target() {
        let rules = BattleRules::default();
        let mut rng = make_test_rng();
        let mut rat = Combatant::opponent("Rat")
            .max_health(5)
            .power(1)
            .crit_chance(0)
            .build()
            .unwrap();
        let mut hero = hero(0);
        hero.status.shielded = true;

        for _ in 0..5 {
            let result = resolve_attack(&mut rat, &mut hero, 1, &rules, &mut rng);
            assert_eq!(result.damage, MIN_DAMAGE_VS_LIVING);
        }
        assert_eq!(hero.current_health(), 95);
    }

    #[test]
    fn test_lethal_hit_clamps_health() {
        let rules = BattleRules::default();
        let mut rng = make_test_rng();
        let mut hero = hero(100);
        let mut goblin = Combatant::opponent("Goblin")
            .max_health(80)
            .current_health(3)
            .power(12)
            .build()
            .unwrap();

        let result = resolve_attack(&mut hero, &mut goblin, 1, &rules, &mut rng);

        assert!(result.damage > 3);
        assert_eq!(goblin.current_health(), 0);
        assert!(!goblin.is_alive());
    }

    proptest! {
        #[test]
        fn prop_health_stays_in_bounds(
            seed in any::<u64>(),
            power in 1u32..200,
            crit_chance in 0u8..=100,
            shielded in any::<bool>(),
            attacks in 1usize..60,
        ) {
            let rules = BattleRules::default();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut attacker = Combatant::opponent("Ogre")
                .max_health(50)
                .power(power)
                .crit_chance(crit_chance)
                .build()
                .unwrap();
            let mut defender = hero(0);
            defender.status.shielded = shielded;

            for _ in 0..attacks {
                resolve_attack(&mut attacker, &mut defender, 1, &rules, &mut rng);
                prop_assert!(defender.current_health() <= defender.max_health());
            }
        }

        #[test]
        fn prop_zero_crit_chance_never_flags_critical(seed in any::<u64>()) {
            let rules = BattleRules::default();
            let mut rng = StdRng::seed_from_u64(seed);
            let attacker = hero(0);
            let defender = goblin();
            for _ in 0..100 {
                let plan = plan_attack(&attacker, &defender, 1, &rules, &mut rng);
                prop_assert!(
                    matches!(plan, PlannedAttack::Hit { critical: false, .. }),
                    "unexpected critical hit: {:?}",
                    plan
                );
            }
        }

        #[test]
        fn prop_full_crit_chance_always_flags_critical(seed in any::<u64>()) {
            let rules = BattleRules::default();
            let mut rng = StdRng::seed_from_u64(seed);
            let attacker = hero(100);
            let defender = goblin();
            for _ in 0..100 {
                let plan = plan_attack(&attacker, &defender, 1, &rules, &mut rng);
                prop_assert!(
                    matches!(plan, PlannedAttack::Hit { critical: true, .. }),
                    "expected a critical hit: {:?}",
                    plan
                );
            }
        }
    }
}
