use super::effects::{effects_for, AttributeEffects};
use super::Attribute;
use serde::Serialize;

/// Display data for one attribute at its current value
#[derive(Debug, Clone, Serialize)]
pub struct AttributeDescription {
    pub attribute: Attribute,
    pub name: String,
    pub summary: &'static str,
    pub value: u32,
    /// Bonuses this attribute alone contributes at `value`
    pub effects: AttributeEffects,
}

fn summary(attribute: Attribute) -> &'static str {
    match attribute {
        Attribute::Strength => "Raises attack, carry capacity and weapon damage.",
        Attribute::Agility => "Raises speed, attack speed, dodge and critical chance.",
        Attribute::Intelligence => "Raises magic attack, mana, spell damage and elemental attack.",
        Attribute::Constitution => "Raises health, defense, health regeneration and damage reduction.",
        Attribute::Spirit => "Raises mana regeneration, status resistance, elemental defense and cooldown reduction.",
    }
}

/// Describe `attribute` at `value`
pub fn describe(attribute: Attribute, value: u32) -> AttributeDescription {
    AttributeDescription {
        attribute,
        name: attribute.to_string(),
        summary: summary(attribute),
        value,
        effects: effects_for(attribute, value),
    }
}
