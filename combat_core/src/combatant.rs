//! Combatant model - health, offensive stats and status flags

use crate::error::BuildError;
use crate::types::{Role, StatusFlags};
use serde::{Deserialize, Serialize};

/// A protagonist or opponent taking part in battles
///
/// Health stays within `0..=max_health`; the only ways to change it are
/// [`Combatant::take_damage`] and the role-gated [`Healer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    name: String,
    role: Role,
    max_health: u32,
    current_health: u32,
    base_power: u32,
    level: u8,
    crit_chance: u8,
    /// Statuses the campaign owner may toggle between rounds
    pub status: StatusFlags,
}

impl Combatant {
    /// Start building a protagonist
    pub fn protagonist(name: impl Into<String>) -> CombatantBuilder {
        CombatantBuilder::new(name, Role::Protagonist)
    }

    /// Start building an opponent
    pub fn opponent(name: impl Into<String>) -> CombatantBuilder {
        CombatantBuilder::new(name, Role::Opponent)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn current_health(&self) -> u32 {
        self.current_health
    }

    pub fn base_power(&self) -> u32 {
        self.base_power
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn crit_chance(&self) -> u8 {
        self.crit_chance
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// Subtract damage, stopping at zero. Returns the health actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.current_health);
        self.current_health -= lost;
        lost
    }

    /// Healing access, present only for roles that can heal
    pub fn healer(&mut self) -> Option<Healer<'_>> {
        if self.role.capabilities().can_heal {
            Some(Healer { combatant: self })
        } else {
            None
        }
    }
}

/// Borrowed heal capability of a combatant whose role allows healing
#[derive(Debug)]
pub struct Healer<'a> {
    combatant: &'a mut Combatant,
}

impl Healer<'_> {
    /// Restore up to `amount` health, capped at max health.
    /// Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let missing = self.combatant.max_health - self.combatant.current_health;
        let restored = amount.min(missing);
        self.combatant.current_health += restored;
        restored
    }

    pub fn combatant(&self) -> &Combatant {
        &*self.combatant
    }
}

/// Validating builder for [`Combatant`]
#[derive(Debug, Clone)]
pub struct CombatantBuilder {
    name: String,
    role: Role,
    max_health: u32,
    current_health: Option<u32>,
    base_power: u32,
    level: u8,
    crit_chance: u8,
    status: StatusFlags,
}

impl CombatantBuilder {
    /// New builder with level 1, 10% crit chance and no stats set
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        CombatantBuilder {
            name: name.into(),
            role,
            max_health: 0,
            current_health: None,
            base_power: 0,
            level: 1,
            crit_chance: 10,
            status: StatusFlags::default(),
        }
    }

    pub fn max_health(mut self, max_health: u32) -> Self {
        self.max_health = max_health;
        self
    }

    /// Start below full health (defaults to max health)
    pub fn current_health(mut self, current_health: u32) -> Self {
        self.current_health = Some(current_health);
        self
    }

    pub fn power(mut self, power: u32) -> Self {
        self.base_power = power;
        self
    }

    pub fn level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn crit_chance(mut self, crit_chance: u8) -> Self {
        self.crit_chance = crit_chance;
        self
    }

    pub fn status(mut self, status: StatusFlags) -> Self {
        self.status = status;
        self
    }

    pub fn build(self) -> Result<Combatant, BuildError> {
        if self.name.trim().is_empty() {
            return Err(BuildError::EmptyName);
        }
        if self.max_health == 0 {
            return Err(BuildError::ZeroMaxHealth { name: self.name });
        }
        if self.base_power == 0 {
            return Err(BuildError::ZeroPower { name: self.name });
        }
        if self.crit_chance > 100 {
            return Err(BuildError::CritChanceOutOfRange {
                name: self.name,
                value: self.crit_chance,
            });
        }

        let current_health = self.current_health.unwrap_or(self.max_health);
        if current_health > self.max_health {
            return Err(BuildError::HealthAboveMax {
                name: self.name,
                current: current_health,
                max: self.max_health,
            });
        }

        Ok(Combatant {
            name: self.name,
            role: self.role,
            max_health: self.max_health,
            current_health,
            base_power: self.base_power,
            level: self.level,
            crit_chance: self.crit_chance,
            status: self.status,
        })
    }
}
