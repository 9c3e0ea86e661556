//! Protagonist inventory

use serde::{Deserialize, Serialize};
use std::fmt;

/// Items carried by the protagonist, in pickup order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    owner: String,
    items: Vec<String>,
}

impl Inventory {
    pub fn new(owner: impl Into<String>) -> Self {
        Inventory {
            owner: owner.into(),
            items: Vec::new(),
        }
    }

    pub fn add_item(&mut self, item: impl Into<String>) {
        self.items.push(item.into());
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            return write!(f, "{}'s inventory is empty.", self.owner);
        }
        write!(f, "{}'s Inventory: ", self.owner)?;
        for item in &self.items {
            write!(f, "{} ", item)?;
        }
        Ok(())
    }
}
