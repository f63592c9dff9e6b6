//! Prelude module for convenient imports
//!
//! ```rust
//! use progression_core::prelude::*;
//! ```

// Facade
pub use crate::facade::{CharacterProgress, CharacterSnapshot, ProgressionFacade};
pub use crate::stats::FinalStats;
pub use crate::ProgressionError;

// Character seam
pub use crate::character::{Character, CharacterRecord};

// Attributes
pub use crate::attribute::{Attribute, AttributeEffects, AttributeStore, Attributes};

// Skills
pub use crate::skill::{EffectBundle, EffectKind, SkillKind, SkillTreeRegistry, SkillTreeTemplate};

// Classes
pub use crate::class::{ClassCatalog, ClassDefinition, Specialization};

// Config
pub use crate::config::{ConfigError, ProgressionConstants};

// Re-exports from unit_core
pub use unit_core::{CounterMatrix, UnitCatalog, UnitType};
