//! progression_core - Character progression for a tactics RPG
//!
//! This library provides:
//! - Attributes: five allocatable stats, their derived effects and a point bank
//! - Skill trees: per-class prerequisite graphs with leveled active/passive nodes
//! - Classes: base stats, per-level growth and specializations
//! - ProgressionFacade: per-character state and final stat composition
//!
//! Content (classes, trees, constants) is built once and handed to the facade.
//! Unit types and counters come from `unit_core`.
//!
//! # Quick Start
//!
//! ```rust
//! use progression_core::prelude::*;
//!
//! let mut facade = ProgressionFacade::with_builtin_content(ProgressionConstants::default()).unwrap();
//! let mut hero = Character::new("hero").with_level(10).with_skill_points(2);
//!
//! facade.select_class("hero", "warrior").unwrap();
//! facade.allocate_attribute("hero", Attribute::Strength, 5).unwrap();
//! facade.learn_skill("hero", &mut hero, "slash").unwrap();
//! facade.select_specialization("hero", "heavy_infantry", hero.level).unwrap();
//!
//! let stats = facade.calculate_final_stats("hero", &hero).unwrap();
//! assert_eq!(stats.unit_type, UnitType::HeavyInfantry);
//! ```

pub mod attribute;
pub mod character;
pub mod class;
pub mod config;
pub mod facade;
pub mod prelude;
pub mod skill;
pub mod stats;

pub use config::{ConfigError, ProgressionConstants};
pub use facade::{CharacterProgress, CharacterSnapshot, ProgressionFacade};
pub use stats::FinalStats;

use attribute::Attribute;
use skill::{LearnError, TreeError};
use thiserror::Error;

/// Why a facade operation did not apply
///
/// Every variant is recoverable; state is unchanged when one is returned.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProgressionError {
    #[error("Unknown character: {0}")]
    UnknownCharacter(String),
    #[error("Unknown class: {0}")]
    UnknownClass(String),
    #[error("Character '{character}' already has class '{class}'")]
    ClassAlreadySelected { character: String, class: String },
    #[error("Character record is tagged '{actual}' but progression is for '{expected}'")]
    ClassMismatch { expected: String, actual: String },
    #[error("Unknown specialization '{specialization}' for class '{class}'")]
    UnknownSpecialization { class: String, specialization: String },
    #[error("Character '{character}' already specialized as '{specialization}'")]
    AlreadySpecialized { character: String, specialization: String },
    #[error("Level {actual} is below required level {required}")]
    LevelTooLow { required: u32, actual: u32 },
    #[error("Cannot allocate {requested} point(s) to {attribute}, {available} available")]
    AllocationFailed {
        attribute: Attribute,
        requested: u32,
        available: u32,
    },
    #[error(transparent)]
    Learn(#[from] LearnError),
    #[error("No skill tree for class: {0}")]
    MissingSkillTree(String),
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(TreeError),
}
