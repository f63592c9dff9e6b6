//! Attribute effect formulas
//!
//! Each attribute maps to a handful of derived bonuses. All formulas are pure;
//! percentage-style ratings are capped.
//!
//! | Attribute    | Bonus                 | Formula                        |
//! |--------------|-----------------------|--------------------------------|
//! | strength     | attack                | floor(0.8 * str)               |
//! |              | carry capacity        | 5 * str                        |
//! |              | weapon damage (mult)  | 1 + 0.02 * (str - 10)          |
//! | agility      | speed                 | floor(1.5 * agi)               |
//! |              | attack speed          | 0.03 * (agi - 10)              |
//! |              | dodge                 | min(0.005 * (agi - 10), 0.30)  |
//! |              | crit                  | min(0.003 * (agi - 10), 0.20)  |
//! | intelligence | magic attack          | floor(1.2 * int)               |
//! |              | max mana              | 8 * int                        |
//! |              | spell damage (mult)   | 1 + 0.025 * (int - 10)         |
//! |              | elemental attack      | floor(0.5 * int)               |
//! | constitution | max hp                | 12 * con                       |
//! |              | defense               | floor(0.6 * con)               |
//! |              | hp regen              | floor(0.3 * con)               |
//! |              | damage reduction      | min(0.002 * (con - 10), 0.15)  |
//! | spirit       | mana regen            | floor(0.8 * spi)               |
//! |              | status resist         | min(0.01 * (spi - 10), 0.50)   |
//! |              | elemental defense     | floor(0.4 * spi)               |
//! |              | cooldown reduction    | min(0.005 * (spi - 10), 0.25)  |

use super::{Attribute, Attributes, DEFAULT_ATTRIBUTE_VALUE};
use serde::{Deserialize, Serialize};

pub const DODGE_CAP: f64 = 0.30;
pub const CRIT_CAP: f64 = 0.20;
pub const DAMAGE_REDUCTION_CAP: f64 = 0.15;
pub const STATUS_RESIST_CAP: f64 = 0.50;
pub const COOLDOWN_REDUCTION_CAP: f64 = 0.25;

/// Derived bonuses from attributes
///
/// Multiplier fields start at 1.0 and combine by product; everything else
/// starts at 0.0 and combines by sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributeEffects {
    // === Strength ===
    pub attack_bonus: f64,
    pub carry_bonus: f64,
    pub weapon_damage_multiplier: f64,

    // === Agility ===
    pub speed_bonus: f64,
    pub attack_speed_bonus: f64,
    pub dodge_chance: f64,
    pub crit_chance: f64,

    // === Intelligence ===
    pub magic_attack: f64,
    pub max_mana_bonus: f64,
    pub spell_damage_multiplier: f64,
    pub elemental_attack: f64,

    // === Constitution ===
    pub max_hp_bonus: f64,
    pub defense_bonus: f64,
    pub hp_regen: f64,
    pub damage_reduction: f64,

    // === Spirit ===
    pub mana_regen: f64,
    pub status_resist: f64,
    pub elemental_defense: f64,
    pub cooldown_reduction: f64,
}

impl Default for AttributeEffects {
    fn default() -> Self {
        AttributeEffects {
            attack_bonus: 0.0,
            carry_bonus: 0.0,
            weapon_damage_multiplier: 1.0,
            speed_bonus: 0.0,
            attack_speed_bonus: 0.0,
            dodge_chance: 0.0,
            crit_chance: 0.0,
            magic_attack: 0.0,
            max_mana_bonus: 0.0,
            spell_damage_multiplier: 1.0,
            elemental_attack: 0.0,
            max_hp_bonus: 0.0,
            defense_bonus: 0.0,
            hp_regen: 0.0,
            damage_reduction: 0.0,
            mana_regen: 0.0,
            status_resist: 0.0,
            elemental_defense: 0.0,
            cooldown_reduction: 0.0,
        }
    }
}

impl AttributeEffects {
    /// Fold another bundle into this one
    pub fn combine(&mut self, other: &AttributeEffects) {
        self.attack_bonus += other.attack_bonus;
        self.carry_bonus += other.carry_bonus;
        self.weapon_damage_multiplier *= other.weapon_damage_multiplier;

        self.speed_bonus += other.speed_bonus;
        self.attack_speed_bonus += other.attack_speed_bonus;
        self.dodge_chance += other.dodge_chance;
        self.crit_chance += other.crit_chance;

        self.magic_attack += other.magic_attack;
        self.max_mana_bonus += other.max_mana_bonus;
        self.spell_damage_multiplier *= other.spell_damage_multiplier;
        self.elemental_attack += other.elemental_attack;

        self.max_hp_bonus += other.max_hp_bonus;
        self.defense_bonus += other.defense_bonus;
        self.hp_regen += other.hp_regen;
        self.damage_reduction += other.damage_reduction;

        self.mana_regen += other.mana_regen;
        self.status_resist += other.status_resist;
        self.elemental_defense += other.elemental_defense;
        self.cooldown_reduction += other.cooldown_reduction;
    }
}

/// Offset from [`DEFAULT_ATTRIBUTE_VALUE`], as a float
///
/// The balance curve always pivots at the default value, independent of
/// `ProgressionConstants::attribute_baseline`. A store whose baseline is
/// raised starts with non-neutral multipliers.
fn above_default(value: u32) -> f64 {
    value as f64 - DEFAULT_ATTRIBUTE_VALUE as f64
}

pub fn strength_effects(strength: u32) -> AttributeEffects {
    let s = strength as f64;
    AttributeEffects {
        attack_bonus: (0.8 * s).floor(),
        carry_bonus: 5.0 * s,
        weapon_damage_multiplier: 1.0 + 0.02 * above_default(strength),
        ..AttributeEffects::default()
    }
}

pub fn agility_effects(agility: u32) -> AttributeEffects {
    let a = agility as f64;
    let delta = above_default(agility);
    AttributeEffects {
        speed_bonus: (1.5 * a).floor(),
        attack_speed_bonus: 0.03 * delta,
        dodge_chance: (0.005 * delta).min(DODGE_CAP),
        crit_chance: (0.003 * delta).min(CRIT_CAP),
        ..AttributeEffects::default()
    }
}

pub fn intelligence_effects(intelligence: u32) -> AttributeEffects {
    let i = intelligence as f64;
    AttributeEffects {
        magic_attack: (1.2 * i).floor(),
        max_mana_bonus: 8.0 * i,
        spell_damage_multiplier: 1.0 + 0.025 * above_default(intelligence),
        elemental_attack: (0.5 * i).floor(),
        ..AttributeEffects::default()
    }
}

pub fn constitution_effects(constitution: u32) -> AttributeEffects {
    let c = constitution as f64;
    AttributeEffects {
        max_hp_bonus: 12.0 * c,
        defense_bonus: (0.6 * c).floor(),
        hp_regen: (0.3 * c).floor(),
        damage_reduction: (0.002 * above_default(constitution)).min(DAMAGE_REDUCTION_CAP),
        ..AttributeEffects::default()
    }
}

pub fn spirit_effects(spirit: u32) -> AttributeEffects {
    let s = spirit as f64;
    let delta = above_default(spirit);
    AttributeEffects {
        mana_regen: (0.8 * s).floor(),
        status_resist: (0.01 * delta).min(STATUS_RESIST_CAP),
        elemental_defense: (0.4 * s).floor(),
        cooldown_reduction: (0.005 * delta).min(COOLDOWN_REDUCTION_CAP),
        ..AttributeEffects::default()
    }
}

/// Effects of a single attribute at `value`
pub fn effects_for(attribute: Attribute, value: u32) -> AttributeEffects {
    match attribute {
        Attribute::Strength => strength_effects(value),
        Attribute::Agility => agility_effects(value),
        Attribute::Intelligence => intelligence_effects(value),
        Attribute::Constitution => constitution_effects(value),
        Attribute::Spirit => spirit_effects(value),
    }
}

/// Effects of all five attributes folded into one bundle
pub fn aggregate(attributes: &Attributes) -> AttributeEffects {
    let mut total = AttributeEffects::default();
    for attribute in Attribute::all() {
        total.combine(&effects_for(*attribute, attributes.get(*attribute)));
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_strength_after_five_points() {
        let fx = strength_effects(15);
        assert!(approx(fx.attack_bonus, 12.0));
        assert!(approx(fx.weapon_damage_multiplier, 1.10));
        assert!(approx(fx.carry_bonus, 75.0));
    }

    #[test]
    fn test_agility_caps() {
        let fx = agility_effects(100);
        assert!(approx(fx.dodge_chance, 0.30));
        assert!(approx(fx.crit_chance, 0.20));
        assert!(approx(fx.speed_bonus, 150.0));
        assert!(approx(fx.attack_speed_bonus, 2.7));
    }

    #[test]
    fn test_agility_below_cap() {
        let fx = agility_effects(30);
        assert!(approx(fx.dodge_chance, 0.10));
        assert!(approx(fx.crit_chance, 0.06));
    }

    #[test]
    fn test_intelligence() {
        let fx = intelligence_effects(20);
        assert!(approx(fx.magic_attack, 24.0));
        assert!(approx(fx.max_mana_bonus, 160.0));
        assert!(approx(fx.spell_damage_multiplier, 1.25));
        assert!(approx(fx.elemental_attack, 10.0));
    }

    #[test]
    fn test_constitution_caps() {
        let fx = constitution_effects(11);
        assert!(approx(fx.max_hp_bonus, 132.0));
        assert!(approx(fx.defense_bonus, 6.0));
        assert!(approx(fx.hp_regen, 3.0));
        assert!(approx(fx.damage_reduction, 0.002));

        let capped = constitution_effects(500);
        assert!(approx(capped.damage_reduction, DAMAGE_REDUCTION_CAP));
    }

    #[test]
    fn test_spirit_caps() {
        let fx = spirit_effects(200);
        assert!(approx(fx.status_resist, STATUS_RESIST_CAP));
        assert!(approx(fx.cooldown_reduction, COOLDOWN_REDUCTION_CAP));
        assert!(approx(fx.mana_regen, 160.0));
        assert!(approx(fx.elemental_defense, 80.0));
    }

    #[test]
    fn test_default_attributes_neutral_multipliers() {
        let fx = aggregate(&Attributes::default());
        assert!(approx(fx.weapon_damage_multiplier, 1.0));
        assert!(approx(fx.spell_damage_multiplier, 1.0));
        assert!(approx(fx.dodge_chance, 0.0));
        assert!(approx(fx.attack_bonus, 8.0));
        assert!(approx(fx.max_hp_bonus, 120.0));
    }

    #[test]
    fn test_aggregate_multiplies_multipliers() {
        let mut attrs = Attributes::default();
        attrs.strength = 20;
        attrs.intelligence = 30;
        let fx = aggregate(&attrs);
        assert!(approx(fx.weapon_damage_multiplier, 1.2));
        assert!(approx(fx.spell_damage_multiplier, 1.5));
        assert!(approx(fx.attack_bonus, 16.0));
        assert!(approx(fx.magic_attack, 36.0));
    }

    #[test]
    fn test_aggregate_is_sum_of_parts() {
        let attrs = Attributes {
            strength: 14,
            agility: 22,
            intelligence: 9,
            constitution: 31,
            spirit: 17,
        };
        let fx = aggregate(&attrs);
        let parts: f64 = Attribute::all()
            .iter()
            .map(|a| effects_for(*a, attrs.get(*a)).max_hp_bonus)
            .sum();
        assert!(approx(fx.max_hp_bonus, parts));
        assert!(approx(fx.speed_bonus, 33.0));
    }
}
