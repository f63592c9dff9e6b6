use crate::attribute::Attribute;
use serde::{Deserialize, Serialize};
use unit_core::UnitType;

/// The five stats a class template defines
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreStats {
    pub hp: f64,
    pub mana: f64,
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
}

impl CoreStats {
    pub fn new(hp: f64, mana: f64, attack: f64, defense: f64, speed: f64) -> Self {
        CoreStats {
            hp,
            mana,
            attack,
            defense,
            speed,
        }
    }

    pub(crate) fn values(&self) -> [f64; 5] {
        [self.hp, self.mana, self.attack, self.defense, self.speed]
    }

    pub(crate) fn floor(&mut self) {
        self.hp = self.hp.floor();
        self.mana = self.mana.floor();
        self.attack = self.attack.floor();
        self.defense = self.defense.floor();
        self.speed = self.speed.floor();
    }
}

fn one() -> f64 {
    1.0
}

/// Bonuses granted by a specialization
///
/// Flat bonuses are added first, then multipliers are applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecializationBonuses {
    #[serde(default)]
    pub hp_flat: f64,
    #[serde(default)]
    pub mana_flat: f64,
    #[serde(default)]
    pub attack_flat: f64,
    #[serde(default)]
    pub defense_flat: f64,
    #[serde(default)]
    pub speed_flat: f64,
    #[serde(default = "one")]
    pub hp_multiplier: f64,
    #[serde(default = "one")]
    pub mana_multiplier: f64,
    #[serde(default = "one")]
    pub attack_multiplier: f64,
    #[serde(default = "one")]
    pub defense_multiplier: f64,
    #[serde(default = "one")]
    pub speed_multiplier: f64,
    #[serde(default = "one")]
    pub magic_multiplier: f64,
}

impl Default for SpecializationBonuses {
    fn default() -> Self {
        SpecializationBonuses {
            hp_flat: 0.0,
            mana_flat: 0.0,
            attack_flat: 0.0,
            defense_flat: 0.0,
            speed_flat: 0.0,
            hp_multiplier: 1.0,
            mana_multiplier: 1.0,
            attack_multiplier: 1.0,
            defense_multiplier: 1.0,
            speed_multiplier: 1.0,
            magic_multiplier: 1.0,
        }
    }
}

impl SpecializationBonuses {
    pub(crate) fn multipliers(&self) -> [f64; 6] {
        [
            self.hp_multiplier,
            self.mana_multiplier,
            self.attack_multiplier,
            self.defense_multiplier,
            self.speed_multiplier,
            self.magic_multiplier,
        ]
    }

    /// Apply flat bonuses, then multipliers, flooring the result
    pub fn apply(&self, stats: &mut CoreStats, magic_attack: &mut f64) {
        stats.hp += self.hp_flat;
        stats.mana += self.mana_flat;
        stats.attack += self.attack_flat;
        stats.defense += self.defense_flat;
        stats.speed += self.speed_flat;

        stats.hp *= self.hp_multiplier;
        stats.mana *= self.mana_multiplier;
        stats.attack *= self.attack_multiplier;
        stats.defense *= self.defense_multiplier;
        stats.speed *= self.speed_multiplier;
        stats.floor();
        *magic_attack = (*magic_attack * self.magic_multiplier).floor();
    }
}

/// A late-unlock branch of a class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specialization {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub required_level: u32,
    /// Unit type the character fields once specialized (class default if absent)
    #[serde(default)]
    pub unit_type: Option<UnitType>,
    #[serde(default)]
    pub bonuses: SpecializationBonuses,
    /// Skill ids in the class tree this specialization is built around
    #[serde(default)]
    pub unlocked_skills: Vec<String>,
}

/// Immutable class template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_unit: UnitType,
    pub base_stats: CoreStats,
    /// Added per level above 1
    pub growth: CoreStats,
    #[serde(default)]
    pub specializations: Vec<Specialization>,
    #[serde(default)]
    pub recommended_attributes: Vec<Attribute>,
    #[serde(default)]
    pub starting_skills: Vec<String>,
    #[serde(default)]
    pub starting_items: Vec<String>,
}

impl ClassDefinition {
    pub fn specialization(&self, id: &str) -> Option<&Specialization> {
        self.specializations.iter().find(|s| s.id == id)
    }

    /// Specializations whose level requirement `level` meets
    pub fn available_specializations(&self, level: u32) -> Vec<&Specialization> {
        self.specializations
            .iter()
            .filter(|s| level >= s.required_level)
            .collect()
    }

    /// `base + growth * (level - 1)`, floored
    pub fn baseline_at(&self, level: u32) -> CoreStats {
        let steps = level.saturating_sub(1) as f64;
        let mut stats = CoreStats {
            hp: self.base_stats.hp + self.growth.hp * steps,
            mana: self.base_stats.mana + self.growth.mana * steps,
            attack: self.base_stats.attack + self.growth.attack * steps,
            defense: self.base_stats.defense + self.growth.defense * steps,
            speed: self.base_stats.speed + self.growth.speed * steps,
        };
        stats.floor();
        stats
    }
}
