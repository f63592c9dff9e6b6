//! Skill trees - per-class prerequisite graphs with leveled nodes

pub mod effect;
mod node;
mod progress;
mod registry;
mod tree;

pub use effect::{EffectBundle, EffectKind, EffectValue, SkillEffect};
pub use node::{ActiveSkill, NodeView, SkillKind, SkillNodeTemplate};
pub use progress::SkillProgress;
pub use registry::SkillTreeRegistry;
pub use tree::{LayoutEdge, LayoutInfo, NodeLayout, SkillTreeTemplate};

use thiserror::Error;

/// Structural problems in a skill tree definition
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Duplicate skill node: {0}")]
    DuplicateNode(String),
    #[error("Unknown skill node: {0}")]
    UnknownNode(String),
    #[error("Node '{node}' requires unknown node '{prerequisite}'")]
    UnknownPrerequisite { node: String, prerequisite: String },
    #[error("Prerequisite cycle through node: {0}")]
    Cycle(String),
    #[error("Node '{0}' has a max level of zero")]
    ZeroMaxLevel(String),
    #[error("Node '{node}' has an empty per-level list for {kind}")]
    EmptyEffectTiers { node: String, kind: EffectKind },
}

/// Why a node could not gain a level
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LearnError {
    #[error("Unknown skill node: {0}")]
    UnknownNode(String),
    #[error("Node '{node}' is already at max level {max_level}")]
    MaxLevel { node: String, max_level: u32 },
    #[error("Character level {actual} is below required level {required}")]
    LevelTooLow { required: u32, actual: u32 },
    #[error("Need {required} skill point(s), have {available}")]
    InsufficientPoints { required: u32, available: u32 },
    #[error("Node '{node}' requires '{prerequisite}' to be learned first")]
    MissingPrerequisite { node: String, prerequisite: String },
}
