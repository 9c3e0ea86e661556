//! Roster loading, validation and the default lineup

use crate::config::{CombatantConfig, ProtagonistConfig, RosterFile};
use crate::inventory::Inventory;
use crate::ConfigError;
use combat_core::{BattleRules, Campaign, Combatant, CombatantBuilder, Role, TurnOrder};
use std::collections::HashSet;
use std::path::Path;

/// Everything needed to start a campaign
#[derive(Debug, Clone)]
pub struct Roster {
    pub rules: BattleRules,
    pub protagonist: CombatantConfig,
    pub inventory: Inventory,
    pub opponents: Vec<CombatantConfig>,
}

impl Default for Roster {
    /// Hero with a sword and shield against a Goblin, an Orc and a Troll
    fn default() -> Self {
        let mut inventory = Inventory::new("Hero");
        inventory.add_item("Sword");
        inventory.add_item("Shield");

        Roster {
            rules: BattleRules::default(),
            protagonist: entry("Hero", 100, 18, 1, 20),
            inventory,
            opponents: vec![
                entry("Goblin", 80, 12, 1, 10),
                entry("Orc", 120, 18, 2, 15),
                entry("Troll", 150, 20, 3, 5),
            ],
        }
    }
}

fn entry(name: &str, health: u32, power: u32, level: u8, crit_chance: u8) -> CombatantConfig {
    CombatantConfig {
        name: name.to_string(),
        health,
        power,
        level,
        crit_chance,
    }
}

impl Roster {
    /// Stats an opponent entry falls back to when it leaves them out
    pub fn default_opponent() -> CombatantConfig {
        entry("Goblin", 100, 15, 1, 10)
    }

    /// Load a roster from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(path.to_path_buf()),
        })?;
        let roster = Self::parse(&content, path)?;
        tracing::info!(
            path = %path.display(),
            opponents = roster.opponents.len(),
            "roster loaded"
        );
        Ok(roster)
    }

    /// Parse and validate roster TOML; `path` is only used in error messages
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let file: RosterFile = toml::from_str(content).map_err(|e| ConfigError::Parse {
            error: e,
            path: path.to_path_buf(),
        })?;
        let roster = Self::from_file(file);
        roster.validate().map_err(|message| ConfigError::Validation {
            message,
            path: path.to_path_buf(),
        })?;
        Ok(roster)
    }

    fn from_file(file: RosterFile) -> Self {
        let ProtagonistConfig {
            stats,
            inventory: items,
        } = file.protagonist;
        let mut inventory = Inventory::new(stats.name.clone());
        for item in items {
            inventory.add_item(item);
        }
        let template = Self::default_opponent();
        Roster {
            rules: file.rules,
            protagonist: stats,
            inventory,
            opponents: file
                .opponents
                .into_iter()
                .map(|entry| entry.resolve(&template))
                .collect(),
        }
    }

    fn validate(&self) -> Result<(), String> {
        self.rules.validate().map_err(|e| e.to_string())?;
        builder(&self.protagonist, Role::Protagonist)
            .build()
            .map_err(|e| e.to_string())?;

        let mut names = HashSet::new();
        names.insert(self.protagonist.name.as_str());
        for opponent in &self.opponents {
            builder(opponent, Role::Opponent)
                .build()
                .map_err(|e| e.to_string())?;
            if !names.insert(opponent.name.as_str()) {
                return Err(format!("duplicate combatant name '{}'", opponent.name));
            }
        }
        Ok(())
    }

    pub fn with_turn_order(mut self, turn_order: TurnOrder) -> Self {
        self.rules.turn_order = turn_order;
        self
    }

    /// Build the protagonist and opponent queue
    pub fn build_campaign(&self) -> Result<Campaign, ConfigError> {
        let protagonist = builder(&self.protagonist, Role::Protagonist).build()?;
        let opponents = self
            .opponents
            .iter()
            .map(|o| builder(o, Role::Opponent).build())
            .collect::<Result<Vec<Combatant>, _>>()?;
        Ok(Campaign::new(protagonist, opponents, self.rules.clone())?)
    }

    /// "Monsters in the game:" followed by one line per queued opponent
    pub fn listing(&self) -> String {
        let mut out = String::from("Monsters in the game:\n");
        for opponent in &self.opponents {
            out.push_str(&format!("- {} (HP: {})\n", opponent.name, opponent.health));
        }
        out
    }
}

fn builder(config: &CombatantConfig, role: Role) -> CombatantBuilder {
    CombatantBuilder::new(config.name.clone(), role)
        .max_health(config.health)
        .power(config.power)
        .level(config.level)
        .crit_chance(config.crit_chance)
}
