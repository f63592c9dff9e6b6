//! Character record seam
//!
//! The character record (level, skill points, class tag) is owned by the
//! host game. The progression core only reads level and skill points for
//! gating, and writes skill points back when nodes are learned or refunded.

use serde::{Deserialize, Serialize};

/// Host-owned character data the progression core reads and updates
pub trait CharacterRecord {
    /// Current character level (1-based)
    fn level(&self) -> u32;

    /// Unspent skill points
    fn skill_points(&self) -> u32;

    /// Overwrite unspent skill points
    fn set_skill_points(&mut self, points: u32);

    /// Class tag, if the host tracks one
    fn class_id(&self) -> Option<&str> {
        None
    }
}

/// Minimal in-memory character record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub level: u32,
    pub skill_points: u32,
    pub class_id: Option<String>,
}

impl Character {
    pub fn new(name: impl Into<String>) -> Self {
        Character {
            name: name.into(),
            level: 1,
            skill_points: 0,
            class_id: None,
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_skill_points(mut self, points: u32) -> Self {
        self.skill_points = points;
        self
    }

    pub fn with_class(mut self, class_id: impl Into<String>) -> Self {
        self.class_id = Some(class_id.into());
        self
    }
}

impl CharacterRecord for Character {
    fn level(&self) -> u32 {
        self.level
    }

    fn skill_points(&self) -> u32 {
        self.skill_points
    }

    fn set_skill_points(&mut self, points: u32) {
        self.skill_points = points;
    }

    fn class_id(&self) -> Option<&str> {
        self.class_id.as_deref()
    }
}
