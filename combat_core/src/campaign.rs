//! Campaign controller - one protagonist through an ordered queue of opponents

use crate::combatant::Combatant;
use crate::config::BattleRules;
use crate::error::BuildError;
use crate::event::{BattleEvent, EventSink};
use crate::turn::{Battle, Initiative, Side};
use crate::types::{Role, Winner};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A validated, ready-to-run campaign
#[derive(Debug, Clone)]
pub struct Campaign {
    protagonist: Combatant,
    opponents: VecDeque<Combatant>,
    rules: BattleRules,
}

/// How one encounter ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterSummary {
    pub opponent: String,
    pub initiative: Initiative,
    pub rounds: u32,
    pub victor: Side,
    /// Protagonist health when the encounter ended
    pub protagonist_health: u32,
}

/// Result of a full campaign run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub winner: Winner,
    /// Protagonist as it left the last encounter
    pub protagonist: Combatant,
    /// Encounters actually fought, in order
    pub encounters: Vec<EncounterSummary>,
    /// Every event, in emission order
    pub events: Vec<BattleEvent>,
}

impl Outcome {
    /// Display name of the winning side
    pub fn winner_name(&self) -> &str {
        match self.winner {
            Winner::Protagonist => self.protagonist.name(),
            Winner::Opponents => "Monsters",
        }
    }
}

/// Forwards to the caller's sink while keeping the campaign's own log
struct Recorder<'s, S: ?Sized> {
    log: Vec<BattleEvent>,
    sink: &'s mut S,
}

impl<S: EventSink + ?Sized> EventSink for Recorder<'_, S> {
    fn publish(&mut self, event: &BattleEvent) {
        self.sink.publish(event);
        self.log.push(event.clone());
    }
}

impl Campaign {
    /// Check roles and rules before anything is fought
    pub fn new(
        protagonist: Combatant,
        opponents: impl IntoIterator<Item = Combatant>,
        rules: BattleRules,
    ) -> Result<Self, BuildError> {
        rules.validate()?;
        expect_role(&protagonist, Role::Protagonist)?;

        let opponents: VecDeque<Combatant> = opponents.into_iter().collect();
        for opponent in &opponents {
            expect_role(opponent, Role::Opponent)?;
        }

        Ok(Campaign {
            protagonist,
            opponents,
            rules,
        })
    }

    pub fn protagonist(&self) -> &Combatant {
        &self.protagonist
    }

    /// Opponents still queued, in encounter order
    pub fn opponents(&self) -> impl Iterator<Item = &Combatant> {
        self.opponents.iter()
    }

    pub fn rules(&self) -> &BattleRules {
        &self.rules
    }

    /// Fight every queued opponent in order
    ///
    /// Stops at the first encounter the protagonist does not survive; opponents
    /// after that are never touched. Health and statuses carry over between
    /// encounters.
    pub fn run<R, S>(self, rng: &mut R, sink: &mut S) -> Outcome
    where
        R: Rng + ?Sized,
        S: EventSink + ?Sized,
    {
        let Campaign {
            mut protagonist,
            mut opponents,
            rules,
        } = self;
        let mut recorder = Recorder {
            log: Vec::new(),
            sink,
        };
        let mut encounters = Vec::new();

        while protagonist.is_alive() {
            let Some(opponent) = opponents.pop_front() else {
                break;
            };
            let span = tracing::info_span!("encounter", opponent = opponent.name());
            let _entered = span.enter();
            recorder.publish(&BattleEvent::EncounterStarted {
                opponent: opponent.name().to_string(),
            });

            let mut battle = Battle::new(&mut protagonist, opponent, &rules, rng);
            tracing::info!(initiative = ?battle.initiative(), "encounter started");

            let victor = battle.fight(rng, &mut recorder);
            let rounds = battle.rounds();
            let initiative = battle.initiative();
            let opponent = battle.into_opponent();

            tracing::info!(
                ?victor,
                rounds,
                protagonist_health = protagonist.current_health(),
                "encounter finished"
            );
            encounters.push(EncounterSummary {
                opponent: opponent.name().to_string(),
                initiative,
                rounds,
                victor,
                protagonist_health: protagonist.current_health(),
            });
        }

        let winner = if protagonist.is_alive() {
            Winner::Protagonist
        } else {
            Winner::Opponents
        };
        tracing::info!(
            ?winner,
            encounters = encounters.len(),
            unreached = opponents.len(),
            "campaign finished"
        );

        Outcome {
            winner,
            protagonist,
            encounters,
            events: recorder.log,
        }
    }
}

fn expect_role(combatant: &Combatant, expected: Role) -> Result<(), BuildError> {
    if combatant.role() == expected {
        Ok(())
    } else {
        Err(BuildError::RoleMismatch {
            name: combatant.name().to_string(),
            expected,
            actual: combatant.role(),
        })
    }
}
