//! FinalStats - a character's composed stat sheet
//!
//! Stages, in order:
//! 1. class baseline at the character's level
//! 2. attribute additive bonuses
//! 3. attribute multipliers (weapon damage on attack, spell damage on magic)
//! 4. specialization flat bonuses
//! 5. specialization multipliers
//!
//! Every multiplicative stage floors its result.

use crate::attribute::AttributeEffects;
use crate::class::{ClassDefinition, CoreStats, Specialization};
use crate::skill::EffectBundle;
use serde::{Deserialize, Serialize};
use unit_core::UnitType;

/// Point-in-time stat sheet for one character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalStats {
    pub level: u32,
    pub unit_type: UnitType,
    pub specialization: Option<String>,

    pub hp: f64,
    pub mana: f64,
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
    pub magic_attack: f64,

    // Secondary ratings, straight from attributes
    pub weapon_damage_multiplier: f64,
    pub spell_damage_multiplier: f64,
    pub attack_speed_bonus: f64,
    pub crit_chance: f64,
    pub dodge_chance: f64,
    pub damage_reduction: f64,
    pub status_resist: f64,
    pub cooldown_reduction: f64,
    pub hp_regen: f64,
    pub mana_regen: f64,
    pub elemental_attack: f64,
    pub elemental_defense: f64,
    pub carry_capacity: f64,

    /// Summed learned passive skills, not folded into the stats above
    pub passive_effects: EffectBundle,
}

impl FinalStats {
    /// Compose the stat sheet for a class at `level`
    pub fn compute(
        class: &ClassDefinition,
        specialization: Option<&Specialization>,
        level: u32,
        effects: &AttributeEffects,
        passive_effects: EffectBundle,
    ) -> Self {
        let mut core = class.baseline_at(level);
        apply_attribute_effects(&mut core, effects);
        let mut magic_attack = (effects.magic_attack * effects.spell_damage_multiplier).floor();

        if let Some(spec) = specialization {
            spec.bonuses.apply(&mut core, &mut magic_attack);
        }

        let unit_type = specialization
            .and_then(|s| s.unit_type)
            .unwrap_or(class.base_unit);

        FinalStats {
            level,
            unit_type,
            specialization: specialization.map(|s| s.id.clone()),
            hp: core.hp,
            mana: core.mana,
            attack: core.attack,
            defense: core.defense,
            speed: core.speed,
            magic_attack,
            weapon_damage_multiplier: effects.weapon_damage_multiplier,
            spell_damage_multiplier: effects.spell_damage_multiplier,
            attack_speed_bonus: effects.attack_speed_bonus,
            crit_chance: effects.crit_chance,
            dodge_chance: effects.dodge_chance,
            damage_reduction: effects.damage_reduction,
            status_resist: effects.status_resist,
            cooldown_reduction: effects.cooldown_reduction,
            hp_regen: effects.hp_regen,
            mana_regen: effects.mana_regen,
            elemental_attack: effects.elemental_attack,
            elemental_defense: effects.elemental_defense,
            carry_capacity: effects.carry_bonus,
            passive_effects,
        }
    }

    /// The five core stats
    pub fn core(&self) -> CoreStats {
        CoreStats::new(self.hp, self.mana, self.attack, self.defense, self.speed)
    }
}

/// Attribute additions, then the weapon damage multiplier on attack
fn apply_attribute_effects(core: &mut CoreStats, effects: &AttributeEffects) {
    core.hp += effects.max_hp_bonus;
    core.mana += effects.max_mana_bonus;
    core.attack += effects.attack_bonus;
    core.defense += effects.defense_bonus;
    core.speed += effects.speed_bonus;

    core.attack = (core.attack * effects.weapon_damage_multiplier).floor();
}
