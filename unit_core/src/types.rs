use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::UnitError;

/// Tactical unit types a character can field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitType {
    // Tier 1
    Swordsman,
    Spearman,
    Archer,
    Apprentice,
    LightCavalry,
    // Tier 2
    HeavyInfantry,
    Berserker,
    Pikeman,
    Longbowman,
    Crossbowman,
    BattleMage,
    HeavyCavalry,
    HorseArcher,
    // Tier 3
    Guardian,
    Warlord,
    Halberdier,
    Marksman,
    Arbalest,
    Archmage,
    Cataphract,
}

impl UnitType {
    /// Number of unit types, and the side length of the counter matrix
    pub const COUNT: usize = 20;

    /// Get all unit types in index order
    pub fn all() -> &'static [UnitType] {
        &[
            UnitType::Swordsman,
            UnitType::Spearman,
            UnitType::Archer,
            UnitType::Apprentice,
            UnitType::LightCavalry,
            UnitType::HeavyInfantry,
            UnitType::Berserker,
            UnitType::Pikeman,
            UnitType::Longbowman,
            UnitType::Crossbowman,
            UnitType::BattleMage,
            UnitType::HeavyCavalry,
            UnitType::HorseArcher,
            UnitType::Guardian,
            UnitType::Warlord,
            UnitType::Halberdier,
            UnitType::Marksman,
            UnitType::Arbalest,
            UnitType::Archmage,
            UnitType::Cataphract,
        ]
    }

    /// Dense index used for matrix lookups
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`UnitType::index`]
    pub fn from_index(index: usize) -> Option<UnitType> {
        Self::all().get(index).copied()
    }

    /// Snake-case key used in config files and snapshots
    pub fn key(self) -> &'static str {
        match self {
            UnitType::Swordsman => "swordsman",
            UnitType::Spearman => "spearman",
            UnitType::Archer => "archer",
            UnitType::Apprentice => "apprentice",
            UnitType::LightCavalry => "light_cavalry",
            UnitType::HeavyInfantry => "heavy_infantry",
            UnitType::Berserker => "berserker",
            UnitType::Pikeman => "pikeman",
            UnitType::Longbowman => "longbowman",
            UnitType::Crossbowman => "crossbowman",
            UnitType::BattleMage => "battle_mage",
            UnitType::HeavyCavalry => "heavy_cavalry",
            UnitType::HorseArcher => "horse_archer",
            UnitType::Guardian => "guardian",
            UnitType::Warlord => "warlord",
            UnitType::Halberdier => "halberdier",
            UnitType::Marksman => "marksman",
            UnitType::Arbalest => "arbalest",
            UnitType::Archmage => "archmage",
            UnitType::Cataphract => "cataphract",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitType::Swordsman => "Swordsman",
            UnitType::Spearman => "Spearman",
            UnitType::Archer => "Archer",
            UnitType::Apprentice => "Apprentice",
            UnitType::LightCavalry => "Light Cavalry",
            UnitType::HeavyInfantry => "Heavy Infantry",
            UnitType::Berserker => "Berserker",
            UnitType::Pikeman => "Pikeman",
            UnitType::Longbowman => "Longbowman",
            UnitType::Crossbowman => "Crossbowman",
            UnitType::BattleMage => "Battle Mage",
            UnitType::HeavyCavalry => "Heavy Cavalry",
            UnitType::HorseArcher => "Horse Archer",
            UnitType::Guardian => "Guardian",
            UnitType::Warlord => "Warlord",
            UnitType::Halberdier => "Halberdier",
            UnitType::Marksman => "Marksman",
            UnitType::Arbalest => "Arbalest",
            UnitType::Archmage => "Archmage",
            UnitType::Cataphract => "Cataphract",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for UnitType {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitType::all()
            .iter()
            .copied()
            .find(|u| u.key() == s)
            .ok_or_else(|| UnitError::UnknownUnit(s.to_string()))
    }
}

/// Broad battlefield role of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitCategory {
    Infantry,
    Ranged,
    Cavalry,
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitCategory::Infantry => write!(f, "Infantry"),
            UnitCategory::Ranged => write!(f, "Ranged"),
            UnitCategory::Cavalry => write!(f, "Cavalry"),
        }
    }
}

/// Upgrade depth of a unit type
///
/// Max-tier units sit outside the counter system entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Base,
    Advanced,
    Max,
}

impl Tier {
    /// Numeric tier (1..=3)
    pub fn level(self) -> u8 {
        match self {
            Tier::Base => 1,
            Tier::Advanced => 2,
            Tier::Max => 3,
        }
    }

    pub fn is_counter_immune(self) -> bool {
        self == Tier::Max
    }
}

/// Where a unit can be promoted to
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeTarget {
    /// Terminal unit
    #[default]
    None,
    /// Linear chain
    Single(UnitType),
    /// Player picks one of several promotions
    Branch(Vec<UnitType>),
}

impl UpgradeTarget {
    /// All promotion targets in choice order
    pub fn options(&self) -> &[UnitType] {
        match self {
            UpgradeTarget::None => &[],
            UpgradeTarget::Single(target) => std::slice::from_ref(target),
            UpgradeTarget::Branch(targets) => targets,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, UpgradeTarget::None)
    }
}
