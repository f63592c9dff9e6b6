//! Skill effects - closed effect kinds, per-level scaling and bundles

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every stat a skill node can modify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    // Flat stat bonuses
    AttackFlat,
    DefenseFlat,
    HpFlat,
    ManaFlat,
    SpeedFlat,
    // Percentage bonuses (0.1 = +10%)
    AttackPercent,
    DefensePercent,
    HpPercent,
    ManaPercent,
    // Ratings
    CritChance,
    DodgeChance,
    DamageReduction,
    CooldownReduction,
    HpRegen,
    ManaRegen,
    // Active skill parameters
    DamageMultiplier,
    Cooldown,
    ManaCost,
    Duration,
    AreaRadius,
    HealAmount,
    StunChance,
}

impl EffectKind {
    pub fn all() -> &'static [EffectKind] {
        &[
            EffectKind::AttackFlat,
            EffectKind::DefenseFlat,
            EffectKind::HpFlat,
            EffectKind::ManaFlat,
            EffectKind::SpeedFlat,
            EffectKind::AttackPercent,
            EffectKind::DefensePercent,
            EffectKind::HpPercent,
            EffectKind::ManaPercent,
            EffectKind::CritChance,
            EffectKind::DodgeChance,
            EffectKind::DamageReduction,
            EffectKind::CooldownReduction,
            EffectKind::HpRegen,
            EffectKind::ManaRegen,
            EffectKind::DamageMultiplier,
            EffectKind::Cooldown,
            EffectKind::ManaCost,
            EffectKind::Duration,
            EffectKind::AreaRadius,
            EffectKind::HealAmount,
            EffectKind::StunChance,
        ]
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EffectKind::AttackFlat => "Attack",
            EffectKind::DefenseFlat => "Defense",
            EffectKind::HpFlat => "Health",
            EffectKind::ManaFlat => "Mana",
            EffectKind::SpeedFlat => "Speed",
            EffectKind::AttackPercent => "Increased Attack",
            EffectKind::DefensePercent => "Increased Defense",
            EffectKind::HpPercent => "Increased Health",
            EffectKind::ManaPercent => "Increased Mana",
            EffectKind::CritChance => "Critical Chance",
            EffectKind::DodgeChance => "Dodge Chance",
            EffectKind::DamageReduction => "Damage Reduction",
            EffectKind::CooldownReduction => "Cooldown Reduction",
            EffectKind::HpRegen => "Health Regeneration",
            EffectKind::ManaRegen => "Mana Regeneration",
            EffectKind::DamageMultiplier => "Damage Multiplier",
            EffectKind::Cooldown => "Cooldown",
            EffectKind::ManaCost => "Mana Cost",
            EffectKind::Duration => "Duration",
            EffectKind::AreaRadius => "Area Radius",
            EffectKind::HealAmount => "Heal Amount",
            EffectKind::StunChance => "Stun Chance",
        };
        write!(f, "{}", s)
    }
}

/// How an effect's magnitude depends on node level
///
/// A scalar scales linearly (`value * level`). A list is indexed by
/// `level - 1` and saturates at its last entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EffectValue {
    Scalar(f64),
    PerLevel(Vec<f64>),
}

impl EffectValue {
    /// Magnitude at `level`; zero for an unlearned node
    pub fn at_level(&self, level: u32) -> f64 {
        if level == 0 {
            return 0.0;
        }
        match self {
            EffectValue::Scalar(v) => v * level as f64,
            EffectValue::PerLevel(tiers) => {
                let idx = (level as usize - 1).min(tiers.len().saturating_sub(1));
                tiers.get(idx).copied().unwrap_or(0.0)
            }
        }
    }
}

/// One effect line on a skill node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEffect {
    pub kind: EffectKind,
    pub value: EffectValue,
}

impl SkillEffect {
    pub fn scalar(kind: EffectKind, value: f64) -> Self {
        SkillEffect {
            kind,
            value: EffectValue::Scalar(value),
        }
    }

    pub fn per_level(kind: EffectKind, values: Vec<f64>) -> Self {
        SkillEffect {
            kind,
            value: EffectValue::PerLevel(values),
        }
    }
}

/// Resolved effect magnitudes, one optional slot per [`EffectKind`]
///
/// Absent slots mean the effect does not apply at all, which matters for
/// active skills (no cooldown vs. a zero cooldown).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectBundle {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub attack_flat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub defense_flat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hp_flat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mana_flat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub speed_flat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub attack_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub defense_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hp_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mana_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub crit_chance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dodge_chance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub damage_reduction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cooldown_reduction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hp_regen: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mana_regen: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub damage_multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cooldown: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mana_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub area_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub heal_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub stun_chance: Option<f64>,
}

impl EffectBundle {
    pub fn new() -> Self {
        EffectBundle::default()
    }

    fn slot(&self, kind: EffectKind) -> &Option<f64> {
        match kind {
            EffectKind::AttackFlat => &self.attack_flat,
            EffectKind::DefenseFlat => &self.defense_flat,
            EffectKind::HpFlat => &self.hp_flat,
            EffectKind::ManaFlat => &self.mana_flat,
            EffectKind::SpeedFlat => &self.speed_flat,
            EffectKind::AttackPercent => &self.attack_percent,
            EffectKind::DefensePercent => &self.defense_percent,
            EffectKind::HpPercent => &self.hp_percent,
            EffectKind::ManaPercent => &self.mana_percent,
            EffectKind::CritChance => &self.crit_chance,
            EffectKind::DodgeChance => &self.dodge_chance,
            EffectKind::DamageReduction => &self.damage_reduction,
            EffectKind::CooldownReduction => &self.cooldown_reduction,
            EffectKind::HpRegen => &self.hp_regen,
            EffectKind::ManaRegen => &self.mana_regen,
            EffectKind::DamageMultiplier => &self.damage_multiplier,
            EffectKind::Cooldown => &self.cooldown,
            EffectKind::ManaCost => &self.mana_cost,
            EffectKind::Duration => &self.duration,
            EffectKind::AreaRadius => &self.area_radius,
            EffectKind::HealAmount => &self.heal_amount,
            EffectKind::StunChance => &self.stun_chance,
        }
    }

    fn slot_mut(&mut self, kind: EffectKind) -> &mut Option<f64> {
        match kind {
            EffectKind::AttackFlat => &mut self.attack_flat,
            EffectKind::DefenseFlat => &mut self.defense_flat,
            EffectKind::HpFlat => &mut self.hp_flat,
            EffectKind::ManaFlat => &mut self.mana_flat,
            EffectKind::SpeedFlat => &mut self.speed_flat,
            EffectKind::AttackPercent => &mut self.attack_percent,
            EffectKind::DefensePercent => &mut self.defense_percent,
            EffectKind::HpPercent => &mut self.hp_percent,
            EffectKind::ManaPercent => &mut self.mana_percent,
            EffectKind::CritChance => &mut self.crit_chance,
            EffectKind::DodgeChance => &mut self.dodge_chance,
            EffectKind::DamageReduction => &mut self.damage_reduction,
            EffectKind::CooldownReduction => &mut self.cooldown_reduction,
            EffectKind::HpRegen => &mut self.hp_regen,
            EffectKind::ManaRegen => &mut self.mana_regen,
            EffectKind::DamageMultiplier => &mut self.damage_multiplier,
            EffectKind::Cooldown => &mut self.cooldown,
            EffectKind::ManaCost => &mut self.mana_cost,
            EffectKind::Duration => &mut self.duration,
            EffectKind::AreaRadius => &mut self.area_radius,
            EffectKind::HealAmount => &mut self.heal_amount,
            EffectKind::StunChance => &mut self.stun_chance,
        }
    }

    /// Magnitude for `kind`, if present
    pub fn get(&self, kind: EffectKind) -> Option<f64> {
        *self.slot(kind)
    }

    /// Magnitude for `kind`, treating absence as zero
    pub fn value(&self, kind: EffectKind) -> f64 {
        self.get(kind).unwrap_or(0.0)
    }

    /// Add `amount` to `kind`, creating the slot if needed
    pub fn add(&mut self, kind: EffectKind, amount: f64) {
        let slot = self.slot_mut(kind);
        *slot = Some(slot.unwrap_or(0.0) + amount);
    }

    /// Sum another bundle into this one, key by key
    pub fn merge(&mut self, other: &EffectBundle) {
        for kind in EffectKind::all() {
            if let Some(v) = other.get(*kind) {
                self.add(*kind, v);
            }
        }
    }

    /// Present entries in [`EffectKind::all`] order
    pub fn entries(&self) -> Vec<(EffectKind, f64)> {
        EffectKind::all()
            .iter()
            .filter_map(|k| self.get(*k).map(|v| (*k, v)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        EffectKind::all().iter().all(|k| self.get(*k).is_none())
    }
}
