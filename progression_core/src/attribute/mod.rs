//! Attributes - the five allocatable base stats

mod description;
pub mod effects;
mod store;

pub use description::{describe, AttributeDescription};
pub use effects::{aggregate, effects_for, AttributeEffects};
pub use store::AttributeStore;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Value every attribute starts at
pub const DEFAULT_ATTRIBUTE_VALUE: u32 = 10;

/// Allocatable base attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Strength,
    Agility,
    Intelligence,
    Constitution,
    Spirit,
}

impl Attribute {
    /// Get all attributes
    pub fn all() -> &'static [Attribute] {
        &[
            Attribute::Strength,
            Attribute::Agility,
            Attribute::Intelligence,
            Attribute::Constitution,
            Attribute::Spirit,
        ]
    }

    /// Snake-case key used in config files
    pub fn key(self) -> &'static str {
        match self {
            Attribute::Strength => "strength",
            Attribute::Agility => "agility",
            Attribute::Intelligence => "intelligence",
            Attribute::Constitution => "constitution",
            Attribute::Spirit => "spirit",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Strength => write!(f, "Strength"),
            Attribute::Agility => write!(f, "Agility"),
            Attribute::Intelligence => write!(f, "Intelligence"),
            Attribute::Constitution => write!(f, "Constitution"),
            Attribute::Spirit => write!(f, "Spirit"),
        }
    }
}

impl FromStr for Attribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::all()
            .iter()
            .copied()
            .find(|a| a.key() == s)
            .ok_or_else(|| format!("unknown attribute '{}'", s))
    }
}

/// One value per attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: u32,
    pub agility: u32,
    pub intelligence: u32,
    pub constitution: u32,
    pub spirit: u32,
}

impl Attributes {
    /// Every attribute set to the same value
    pub fn uniform(value: u32) -> Self {
        Attributes {
            strength: value,
            agility: value,
            intelligence: value,
            constitution: value,
            spirit: value,
        }
    }

    pub fn get(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Agility => self.agility,
            Attribute::Intelligence => self.intelligence,
            Attribute::Constitution => self.constitution,
            Attribute::Spirit => self.spirit,
        }
    }

    pub fn get_mut(&mut self, attribute: Attribute) -> &mut u32 {
        match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Agility => &mut self.agility,
            Attribute::Intelligence => &mut self.intelligence,
            Attribute::Constitution => &mut self.constitution,
            Attribute::Spirit => &mut self.spirit,
        }
    }

    /// Points above `baseline`, summed over all attributes (saturating)
    pub fn invested_above(&self, baseline: u32) -> u32 {
        Attribute::all()
            .iter()
            .map(|a| self.get(*a).saturating_sub(baseline))
            .fold(0u32, u32::saturating_add)
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Attributes::uniform(DEFAULT_ATTRIBUTE_VALUE)
    }
}
