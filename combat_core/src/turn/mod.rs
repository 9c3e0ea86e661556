//! Turn scheduling - one protagonist against one opponent, round by round
//!
//! Each round walks a small state machine:
//!
//! ```text
//! RoundStart -> FirstActorAttacks -> CheckSecondAlive -> SecondActorAttacks -> PostRoundEffects -> RoundEnd
//!            \-> SimultaneousExchange ----------------------------------------/
//! ```
//!
//! The battle is over as soon as either side reaches zero health; that is
//! checked after every attack, so a lethal first attack skips the second one
//! and the post-round heal. A round both sides survive closes with a
//! `RoundEnded` marker.

use crate::combat::{commit_attack, plan_attack, resolve_attack};
use crate::combatant::Combatant;
use crate::config::{BattleRules, TurnOrder};
use crate::event::{BattleEvent, EventSink};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// One side of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Protagonist,
    Opponent,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Protagonist => Side::Opponent,
            Side::Opponent => Side::Protagonist,
        }
    }
}

/// Attack order fixed for a whole battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Initiative {
    /// This side attacks first every round
    First(Side),
    Simultaneous,
}

impl Initiative {
    /// Resolve a turn order policy; `Random` flips one coin
    pub fn decide<R: Rng + ?Sized>(order: TurnOrder, rng: &mut R) -> Self {
        match order {
            TurnOrder::ProtagonistFirst => Initiative::First(Side::Protagonist),
            TurnOrder::Random => {
                if rng.gen_bool(0.5) {
                    Initiative::First(Side::Protagonist)
                } else {
                    Initiative::First(Side::Opponent)
                }
            }
            TurnOrder::Simultaneous => Initiative::Simultaneous,
        }
    }
}

/// States of a single round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    RoundStart,
    FirstActorAttacks,
    CheckSecondAlive,
    SecondActorAttacks,
    SimultaneousExchange,
    PostRoundEffects,
    RoundEnd,
}

/// A battle between the campaign's protagonist and one opponent
#[derive(Debug)]
pub struct Battle<'a> {
    protagonist: &'a mut Combatant,
    opponent: Combatant,
    rules: &'a BattleRules,
    initiative: Initiative,
    rounds: u32,
}

impl<'a> Battle<'a> {
    pub fn new<R: Rng + ?Sized>(
        protagonist: &'a mut Combatant,
        opponent: Combatant,
        rules: &'a BattleRules,
        rng: &mut R,
    ) -> Self {
        let initiative = Initiative::decide(rules.turn_order, rng);
        Self::with_initiative(protagonist, opponent, rules, initiative)
    }

    /// Battle with a predetermined attack order
    pub fn with_initiative(
        protagonist: &'a mut Combatant,
        opponent: Combatant,
        rules: &'a BattleRules,
        initiative: Initiative,
    ) -> Self {
        Battle {
            protagonist,
            opponent,
            rules,
            initiative,
            rounds: 0,
        }
    }

    pub fn protagonist(&self) -> &Combatant {
        &*self.protagonist
    }

    /// Mutable access between rounds, e.g. to stun or shield
    pub fn protagonist_mut(&mut self) -> &mut Combatant {
        &mut *self.protagonist
    }

    pub fn opponent(&self) -> &Combatant {
        &self.opponent
    }

    pub fn opponent_mut(&mut self) -> &mut Combatant {
        &mut self.opponent
    }

    pub fn initiative(&self) -> Initiative {
        self.initiative
    }

    /// Rounds played so far
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn is_over(&self) -> bool {
        !self.protagonist.is_alive() || !self.opponent.is_alive()
    }

    /// Winning side once the battle is over
    ///
    /// A protagonist at zero health always loses, even if the opponent fell in
    /// the same simultaneous exchange.
    pub fn victor(&self) -> Option<Side> {
        if !self.protagonist.is_alive() {
            Some(Side::Opponent)
        } else if !self.opponent.is_alive() {
            Some(Side::Protagonist)
        } else {
            None
        }
    }

    /// Give back the opponent in its final state
    pub fn into_opponent(self) -> Combatant {
        self.opponent
    }

    /// Play one round and return its events in order
    ///
    /// Does nothing once the battle is over.
    pub fn play_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<BattleEvent> {
        let mut events = Vec::new();
        if self.is_over() {
            return events;
        }
        self.rounds += 1;

        let mut phase = RoundPhase::RoundStart;
        while phase != RoundPhase::RoundEnd {
            phase = self.step(phase, rng, &mut events);
        }

        tracing::debug!(
            round = self.rounds,
            protagonist_health = self.protagonist.current_health(),
            opponent_health = self.opponent.current_health(),
            "round finished"
        );
        events
    }

    /// Play rounds until one side falls, publishing every event
    pub fn fight<R, S>(&mut self, rng: &mut R, sink: &mut S) -> Side
    where
        R: Rng + ?Sized,
        S: EventSink + ?Sized,
    {
        loop {
            if let Some(side) = self.victor() {
                return side;
            }
            for event in self.play_round(rng) {
                sink.publish(&event);
            }
        }
    }

    fn step<R: Rng + ?Sized>(
        &mut self,
        phase: RoundPhase,
        rng: &mut R,
        events: &mut Vec<BattleEvent>,
    ) -> RoundPhase {
        match phase {
            RoundPhase::RoundStart => match self.initiative {
                Initiative::Simultaneous => RoundPhase::SimultaneousExchange,
                Initiative::First(_) => RoundPhase::FirstActorAttacks,
            },
            RoundPhase::FirstActorAttacks => {
                self.attack(self.first_actor(), rng, events);
                RoundPhase::CheckSecondAlive
            }
            RoundPhase::CheckSecondAlive => {
                if self.is_over() {
                    RoundPhase::RoundEnd
                } else {
                    RoundPhase::SecondActorAttacks
                }
            }
            RoundPhase::SecondActorAttacks => {
                self.attack(self.first_actor().other(), rng, events);
                self.after_attacks()
            }
            RoundPhase::SimultaneousExchange => {
                self.exchange(rng, events);
                self.after_attacks()
            }
            RoundPhase::PostRoundEffects => {
                self.auto_heal(events);
                events.push(BattleEvent::RoundEnded { round: self.rounds });
                RoundPhase::RoundEnd
            }
            RoundPhase::RoundEnd => RoundPhase::RoundEnd,
        }
    }

    fn after_attacks(&self) -> RoundPhase {
        if self.is_over() {
            RoundPhase::RoundEnd
        } else {
            RoundPhase::PostRoundEffects
        }
    }

    fn first_actor(&self) -> Side {
        match self.initiative {
            Initiative::First(side) => side,
            Initiative::Simultaneous => Side::Protagonist,
        }
    }

    fn attack<R: Rng + ?Sized>(&mut self, side: Side, rng: &mut R, events: &mut Vec<BattleEvent>) {
        let (attacker, defender) = match side {
            Side::Protagonist => (&mut *self.protagonist, &mut self.opponent),
            Side::Opponent => (&mut self.opponent, &mut *self.protagonist),
        };
        let resolution = resolve_attack(
            attacker,
            defender,
            self.rules.attack_multiplier,
            self.rules,
            rng,
        );
        events.extend(resolution.events);
        events.push(BattleEvent::status_of(defender));
    }

    /// Plan both attacks in parallel from the round-start snapshot, then
    /// commit them here in a fixed order: protagonist's hit first.
    fn exchange<R: Rng + ?Sized>(&mut self, rng: &mut R, events: &mut Vec<BattleEvent>) {
        let mut protagonist_rng = ChaCha8Rng::seed_from_u64(rng.gen());
        let mut opponent_rng = ChaCha8Rng::seed_from_u64(rng.gen());
        let multiplier = self.rules.attack_multiplier;
        let rules = self.rules;

        let (outgoing, incoming) = {
            let protagonist = &*self.protagonist;
            let opponent = &self.opponent;
            rayon::join(
                || plan_attack(protagonist, opponent, multiplier, rules, &mut protagonist_rng),
                || plan_attack(opponent, protagonist, multiplier, rules, &mut opponent_rng),
            )
        };

        let outgoing = commit_attack(outgoing, &mut *self.protagonist, &mut self.opponent);
        let incoming = commit_attack(incoming, &mut self.opponent, &mut *self.protagonist);

        events.extend(outgoing.events);
        events.extend(incoming.events);
        events.push(BattleEvent::status_of(&self.opponent));
        events.push(BattleEvent::status_of(&*self.protagonist));
    }

    fn auto_heal(&mut self, events: &mut Vec<BattleEvent>) {
        if !self.protagonist.is_alive()
            || self.protagonist.current_health() >= self.rules.heal_threshold
        {
            return;
        }
        if let Some(mut healer) = self.protagonist.healer() {
            let amount = healer.heal(self.rules.heal_amount);
            let healed = healer.combatant();
            events.push(BattleEvent::Heal {
                actor: healed.name().to_string(),
                amount,
            });
            events.push(BattleEvent::status_of(healed));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use rand::rngs::StdRng;

    fn make_test_rng() -> StdRng {
        StdRng::seed_from_u64(12345)
    }

    fn hero() -> Combatant {
        Combatant::protagonist("Hero")
            .max_health(100)
            .power(18)
            .crit_chance(0)
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

    fn kinds(events: &[BattleEvent]) -> Vec<EventKind> {
        events.iter().map(|e| e.kind()).collect()
    }

    #[test]
    fn test_round_order_protagonist_first() {
        let rules = BattleRules::default();
        let mut rng = make_test_rng();
        let mut hero = hero();
        let mut battle = Battle::new(&mut hero, goblin(), &rules, &mut rng);

        let events = battle.play_round(&mut rng);

        assert_eq!(
            kinds(&events),
            vec![
                EventKind::Attack,
                EventKind::Status,
                EventKind::Attack,
                EventKind::Status,
                EventKind::RoundEnded
            ]
        );
        assert_eq!(events[0].actor(), Some("Hero"));
        assert_eq!(events[1].actor(), Some("Goblin"));
        assert_eq!(events[2].actor(), Some("Goblin"));
        assert_eq!(events[3].actor(), Some("Hero"));
        assert_eq!(events[4], BattleEvent::RoundEnded { round: 1 });
        assert_eq!(battle.rounds(), 1);
    }

    #[test]
    fn test_opponent_first_initiative() {
        let rules = BattleRules::default();
        let mut rng = make_test_rng();
        let mut hero = hero();
        let mut battle = Battle::with_initiative(
            &mut hero,
            goblin(),
            &rules,
            Initiative::First(Side::Opponent),
        );

        let events = battle.play_round(&mut rng);
        assert_eq!(events[0].actor(), Some("Goblin"));
        assert_eq!(events[2].actor(), Some("Hero"));
    }

    #[test]
    fn test_random_initiative_fixed_for_battle() {
        let rules = BattleRules::default().with_turn_order(TurnOrder::Random);
        let mut seen = Vec::new();
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut hero = hero();
            let mut battle = Battle::new(&mut hero, goblin(), &rules, &mut rng);
            let initiative = battle.initiative();

            while !battle.is_over() {
                let events = battle.play_round(&mut rng);
                let expected = match initiative {
                    Initiative::First(Side::Protagonist) => "Hero",
                    Initiative::First(Side::Opponent) => "Goblin",
                    Initiative::Simultaneous => unreachable!(),
                };
                assert_eq!(events[0].actor(), Some(expected));
                assert_eq!(battle.initiative(), initiative);
            }
            seen.push(initiative);
        }
        assert!(seen.contains(&Initiative::First(Side::Protagonist)));
        assert!(seen.contains(&Initiative::First(Side::Opponent)));
    }

    #[test]
    fn test_lethal_first_attack_skips_second() {
        let rules = BattleRules::default();
        let mut rng = make_test_rng();
        let mut hero = hero();
        let weak = Combatant::opponent("Rat")
            .max_health(5)
            .power(50)
            .build()
            .unwrap();
        let mut battle = Battle::new(&mut hero, weak, &rules, &mut rng);

        let events = battle.play_round(&mut rng);

        assert_eq!(kinds(&events), vec![EventKind::Attack, EventKind::Status]);
        assert!(battle.is_over());
        assert_eq!(battle.victor(), Some(Side::Protagonist));
        assert!(battle.play_round(&mut rng).is_empty());
        assert_eq!(battle.rounds(), 1);
    }

    #[test]
    fn test_auto_heal_below_threshold() {
        let rules = BattleRules::default();
        let mut rng = make_test_rng();
        let mut hero = Combatant::protagonist("Hero")
            .max_health(100)
            .current_health(60)
            .power(18)
            .crit_chance(0)
            .build()
            .unwrap();
        // Opponent hits for exactly 30
        let brute = Combatant::opponent("Brute")
            .max_health(500)
            .power(30)
            .crit_chance(0)
            .build()
            .unwrap();
        let fixed = BattleRules {
            variation: crate::config::VariationRange {
                min_tenths: 10,
                max_tenths: 10,
            },
            ..rules
        };
        let mut battle = Battle::new(&mut hero, brute, &fixed, &mut rng);

        let events = battle.play_round(&mut rng);

        assert_eq!(
            kinds(&events),
            vec![
                EventKind::Attack,
                EventKind::Status,
                EventKind::Attack,
                EventKind::Status,
                EventKind::Heal,
                EventKind::Status,
                EventKind::RoundEnded
            ]
        );
        assert_eq!(events[4].amount(), Some(20));
        assert_eq!(events[5].to_string(), "[LOG] Hero (Lv 1) HP: 50/100");
        assert_eq!(battle.protagonist().current_health(), 50);
    }

    #[test]
    fn test_auto_heal_event_reports_capped_amount() {
        let rules = BattleRules {
            heal_threshold: 60,
            variation: crate::config::VariationRange {
                min_tenths: 10,
                max_tenths: 10,
            },
            ..Default::default()
        };
        let mut rng = make_test_rng();
        let mut hero = Combatant::protagonist("Hero")
            .max_health(50)
            .power(18)
            .crit_chance(0)
            .build()
            .unwrap();
        // Hits for exactly 5, leaving the hero at 45/50
        let imp = Combatant::opponent("Imp")
            .max_health(500)
            .power(5)
            .crit_chance(0)
            .build()
            .unwrap();
        let mut battle = Battle::new(&mut hero, imp, &rules, &mut rng);

        let events = battle.play_round(&mut rng);

        assert_eq!(events.len(), 7);
        assert_eq!(
            events[4],
            BattleEvent::Heal {
                actor: "Hero".to_string(),
                amount: 5,
            }
        );
        assert_eq!(events[5].to_string(), "[LOG] Hero (Lv 1) HP: 50/50");
        assert_eq!(events[6].kind(), EventKind::RoundEnded);
        assert_eq!(battle.protagonist().current_health(), 50);
    }

    #[test]
    fn test_auto_heal_at_full_health_still_reported() {
        let rules = BattleRules::default();
        let mut rng = make_test_rng();
        // Max health below the heal threshold
        let mut hero = Combatant::protagonist("Hero")
            .max_health(30)
            .power(18)
            .crit_chance(0)
            .build()
            .unwrap();
        let mut goblin = goblin();
        goblin.status.stunned = true;
        let mut battle = Battle::new(&mut hero, goblin, &rules, &mut rng);

        let events = battle.play_round(&mut rng);

        assert_eq!(
            kinds(&events),
            vec![
                EventKind::Attack,
                EventKind::Status,
                EventKind::Stunned,
                EventKind::Status,
                EventKind::Heal,
                EventKind::Status,
                EventKind::RoundEnded
            ]
        );
        assert_eq!(events[4].amount(), Some(0));
        assert_eq!(events[5].to_string(), "[LOG] Hero (Lv 1) HP: 30/30");
    }

    #[test]
    fn test_no_heal_at_threshold() {
        let rules = BattleRules {
            variation: crate::config::VariationRange {
                min_tenths: 10,
                max_tenths: 10,
            },
            ..Default::default()
        };
        let mut rng = make_test_rng();
        let mut hero = Combatant::protagonist("Hero")
            .max_health(100)
            .current_health(70)
            .power(18)
            .build()
            .unwrap();
        let brute = Combatant::opponent("Brute")
            .max_health(500)
            .power(30)
            .crit_chance(0)
            .build()
            .unwrap();
        let mut battle = Battle::new(&mut hero, brute, &rules, &mut rng);
        let events = battle.play_round(&mut rng);

        assert!(!kinds(&events).contains(&EventKind::Heal));
        assert_eq!(battle.protagonist().current_health(), 40);
    }

    #[test]
    fn test_stunned_protagonist_loses_one_turn() {
        let rules = BattleRules::default();
        let mut rng = make_test_rng();
        let mut hero = hero();
        let mut battle = Battle::new(&mut hero, goblin(), &rules, &mut rng);
        battle.protagonist_mut().status.stunned = true;

        let first = battle.play_round(&mut rng);
        assert_eq!(first[0].kind(), EventKind::Stunned);
        assert_eq!(first[1].to_string(), "[LOG] Goblin (Lv 1) HP: 80/80");
        assert!(!battle.protagonist().status.stunned);

        let second = battle.play_round(&mut rng);
        assert_eq!(second[0].kind(), EventKind::Attack);
        assert_eq!(second[0].actor(), Some("Hero"));
    }

    #[test]
    fn test_simultaneous_commits_both_from_snapshot() {
        let rules = BattleRules::default().with_turn_order(TurnOrder::Simultaneous);
        let mut rng = make_test_rng();
        let mut hero = Combatant::protagonist("Hero")
            .max_health(100)
            .current_health(5)
            .power(200)
            .crit_chance(0)
            .build()
            .unwrap();
        let ogre = Combatant::opponent("Ogre")
            .max_health(50)
            .power(100)
            .crit_chance(0)
            .build()
            .unwrap();
        let mut battle = Battle::new(&mut hero, ogre, &rules, &mut rng);
        assert_eq!(battle.initiative(), Initiative::Simultaneous);

        let events = battle.play_round(&mut rng);

        // Both hits land even though the first one is lethal
        assert_eq!(
            kinds(&events),
            vec![
                EventKind::Attack,
                EventKind::Attack,
                EventKind::Status,
                EventKind::Status
            ]
        );
        assert_eq!(events[0].actor(), Some("Hero"));
        assert_eq!(events[1].actor(), Some("Ogre"));
        assert!(!battle.protagonist().is_alive());
        assert!(!battle.opponent().is_alive());
        assert_eq!(battle.victor(), Some(Side::Opponent));
    }

    #[test]
    fn test_simultaneous_is_reproducible() {
        let rules = BattleRules::default().with_turn_order(TurnOrder::Simultaneous);
        let run = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut hero = hero();
            let mut battle = Battle::new(&mut hero, goblin(), &rules, &mut rng);
            let mut events: Vec<BattleEvent> = Vec::new();
            battle.fight(&mut rng, &mut events);
            events
        };
        assert_eq!(run(7), run(7));
    }

    #[test]
    fn test_fight_until_victor() {
        let rules = BattleRules::default();
        let mut rng = make_test_rng();
        let mut hero = hero();
        let mut battle = Battle::new(&mut hero, goblin(), &rules, &mut rng);
        let mut events: Vec<BattleEvent> = Vec::new();

        let victor = battle.fight(&mut rng, &mut events);

        assert_eq!(victor, Side::Protagonist);
        assert_eq!(battle.opponent().current_health(), 0);
        assert!(battle.rounds() <= 20);
        // The lethal round ends without a RoundEnded marker
        assert_eq!(events.last().and_then(|e| e.actor()), Some("Goblin"));
        let markers = events
            .iter()
            .filter(|e| e.kind() == EventKind::RoundEnded)
            .count();
        assert_eq!(markers as u32, battle.rounds() - 1);
    }
}
