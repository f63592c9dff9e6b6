use super::effect::{EffectBundle, SkillEffect};
use serde::{Deserialize, Serialize};

/// Whether a node is used on demand or always on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    Active,
    Passive,
}

fn default_points_per_level() -> u32 {
    1
}

fn default_max_level() -> u32 {
    1
}

/// Immutable definition of one skill node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillNodeTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: SkillKind,
    #[serde(default = "default_max_level")]
    pub max_level: u32,
    /// Nodes that must be learned (level >= 1) first
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// Minimum character level to learn any level of this node
    #[serde(default)]
    pub required_level: u32,
    /// Skill points consumed per level learned
    #[serde(default = "default_points_per_level")]
    pub points_per_level: u32,
    #[serde(default)]
    pub effects: Vec<SkillEffect>,
}

impl SkillNodeTemplate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: SkillKind) -> Self {
        SkillNodeTemplate {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            kind,
            max_level: 1,
            prerequisites: Vec::new(),
            required_level: 0,
            points_per_level: 1,
            effects: Vec::new(),
        }
    }

    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn with_prerequisite(mut self, id: impl Into<String>) -> Self {
        self.prerequisites.push(id.into());
        self
    }

    pub fn with_required_level(mut self, level: u32) -> Self {
        self.required_level = level;
        self
    }

    pub fn with_points_per_level(mut self, points: u32) -> Self {
        self.points_per_level = points;
        self
    }

    pub fn with_effect(mut self, effect: SkillEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn is_passive(&self) -> bool {
        self.kind == SkillKind::Passive
    }

    /// All effect magnitudes at `level` (empty at level 0)
    pub fn effects_at(&self, level: u32) -> EffectBundle {
        let mut bundle = EffectBundle::new();
        if level == 0 {
            return bundle;
        }
        for effect in &self.effects {
            bundle.add(effect.kind, effect.value.at_level(level));
        }
        bundle
    }
}

/// One node as seen by a specific character
#[derive(Debug, Clone, Serialize)]
pub struct NodeView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: SkillKind,
    pub level: u32,
    pub max_level: u32,
    pub required_level: u32,
    pub points_per_level: u32,
    pub prerequisites: Vec<String>,
    pub is_learned: bool,
    pub is_unlocked: bool,
    pub can_learn: bool,
    pub current_effects: EffectBundle,
    /// Effects after one more level, if not maxed
    pub next_effects: Option<EffectBundle>,
}

/// A learned active node with effects resolved at its level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveSkill {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub effects: EffectBundle,
}
