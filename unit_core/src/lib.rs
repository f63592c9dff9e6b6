//! unit_core - Unit types, upgrade chains and counter multipliers
//!
//! This library provides:
//! - UnitType: the closed set of tactical unit types
//! - UnitCatalog: tier/category metadata and the upgrade graph
//! - CounterMatrix: precomputed attacker x defender damage multipliers
//!
//! # Quick Start
//!
//! ```rust
//! use unit_core::{CounterMatrix, UnitCatalog, UnitType};
//!
//! let catalog = UnitCatalog::standard();
//! let matrix = CounterMatrix::standard();
//!
//! let dmg = matrix.damage(UnitType::Spearman, UnitType::LightCavalry, 100.0);
//! assert_eq!(dmg, 130.0);
//!
//! let promoted = catalog.upgrade(UnitType::Spearman, 0).unwrap();
//! assert_eq!(promoted, UnitType::Pikeman);
//! ```

pub mod catalog;
pub mod counter;
pub mod types;

pub use catalog::{UnitCatalog, UnitInfo};
pub use counter::{CounterMatrix, CounterRule};
pub use types::{Tier, UnitCategory, UnitType, UpgradeTarget};

use thiserror::Error;

/// Errors from unit lookups, promotion and catalog construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitError {
    #[error("Unknown unit type: {0}")]
    UnknownUnit(String),
    #[error("{0} has no upgrade")]
    NoUpgrade(UnitType),
    #[error("Invalid upgrade choice {choice} for {unit} ({options} option(s))")]
    InvalidChoice {
        unit: UnitType,
        choice: usize,
        options: usize,
    },
    #[error("Unit listed twice in catalog: {0}")]
    DuplicateUnit(UnitType),
    #[error("Unit missing from catalog: {0}")]
    MissingUnit(UnitType),
    #[error("Unit has more than one upgrade parent: {0}")]
    MultipleParents(UnitType),
    #[error("Upgrade from {from} to {to} does not raise the tier")]
    InvalidUpgrade { from: UnitType, to: UnitType },
}
