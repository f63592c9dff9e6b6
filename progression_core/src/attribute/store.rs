//! AttributeStore - per-character attribute values and point bank

use super::description::{describe, AttributeDescription};
use super::effects::{aggregate, AttributeEffects};
use super::{Attribute, Attributes, DEFAULT_ATTRIBUTE_VALUE};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Attribute values plus the unspent point bank for one character
///
/// `total_invested` always equals the sum of each attribute's excess over the
/// baseline; it is recomputed from the values rather than kept as a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeStore {
    attributes: Attributes,
    available_points: u32,
    total_invested: u32,
    baseline: u32,
}

impl AttributeStore {
    /// Fresh store at the default baseline with `starting_points` to spend
    pub fn new(starting_points: u32) -> Self {
        Self::with_baseline(DEFAULT_ATTRIBUTE_VALUE, starting_points)
    }

    pub fn with_baseline(baseline: u32, starting_points: u32) -> Self {
        AttributeStore {
            attributes: Attributes::uniform(baseline),
            available_points: starting_points,
            total_invested: 0,
            baseline,
        }
    }

    /// Rebuild a store from persisted values
    pub fn from_parts(attributes: Attributes, available_points: u32, baseline: u32) -> Self {
        AttributeStore {
            total_invested: attributes.invested_above(baseline),
            attributes,
            available_points,
            baseline,
        }
    }

    pub fn get(&self, attribute: Attribute) -> u32 {
        self.attributes.get(attribute)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn available_points(&self) -> u32 {
        self.available_points
    }

    pub fn total_invested(&self) -> u32 {
        self.total_invested
    }

    pub fn baseline(&self) -> u32 {
        self.baseline
    }

    /// Spend `amount` points on `attribute`
    ///
    /// Returns false (and changes nothing) when `amount` is zero, exceeds
    /// the available points, or would push the value past `u32::MAX`.
    pub fn allocate(&mut self, attribute: Attribute, amount: u32) -> bool {
        if amount == 0 || amount > self.available_points {
            return false;
        }
        let Some(raised) = self.get(attribute).checked_add(amount) else {
            return false;
        };
        *self.attributes.get_mut(attribute) = raised;
        self.available_points -= amount;
        self.total_invested = self.total_invested.saturating_add(amount);
        debug!(%attribute, amount, remaining = self.available_points, "allocated attribute points");
        true
    }

    /// Return every invested point to the bank and restore the baseline
    ///
    /// Returns the number of points refunded.
    pub fn reset(&mut self) -> u32 {
        let refund = self.attributes.invested_above(self.baseline);
        self.available_points = self.available_points.saturating_add(refund);
        self.attributes = Attributes::uniform(self.baseline);
        self.total_invested = 0;
        debug!(refund, available = self.available_points, "reset attributes");
        refund
    }

    /// Add unspent points to the bank
    pub fn grant_points(&mut self, amount: u32) {
        self.available_points = self.available_points.saturating_add(amount);
    }

    /// Overwrite one attribute from an external source
    ///
    /// Negative values are clamped to zero. `total_invested` is recomputed, so
    /// lowering an attribute below the baseline drops that deficit from the
    /// ledger rather than charging it against other attributes.
    pub fn set(&mut self, attribute: Attribute, value: i64) {
        let clamped = value.clamp(0, u32::MAX as i64) as u32;
        *self.attributes.get_mut(attribute) = clamped;
        self.total_invested = self.attributes.invested_above(self.baseline);
    }

    /// Derived bonuses from the current values
    pub fn effects(&self) -> AttributeEffects {
        aggregate(&self.attributes)
    }

    /// Display data for every attribute
    pub fn get_all_attribute_descriptions(&self) -> Vec<AttributeDescription> {
        Attribute::all()
            .iter()
            .map(|a| describe(*a, self.get(*a)))
            .collect()
    }
}

impl Default for AttributeStore {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_allocate_success() {
        let mut store = AttributeStore::new(5);
        assert!(store.allocate(Attribute::Strength, 5));
        assert_eq!(store.get(Attribute::Strength), 15);
        assert_eq!(store.available_points(), 0);
        assert_eq!(store.total_invested(), 5);
        assert!((store.effects().attack_bonus - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_allocate_insufficient_points_is_noop() {
        let mut store = AttributeStore::new(3);
        assert!(!store.allocate(Attribute::Agility, 4));
        assert_eq!(store.get(Attribute::Agility), 10);
        assert_eq!(store.available_points(), 3);
        assert_eq!(store.total_invested(), 0);
    }

    #[test]
    fn test_allocate_zero_is_noop() {
        let mut store = AttributeStore::new(3);
        assert!(!store.allocate(Attribute::Spirit, 0));
        assert_eq!(store.available_points(), 3);
    }

    #[test]
    fn test_reset_refunds_everything() {
        let mut store = AttributeStore::new(10);
        store.allocate(Attribute::Strength, 3);
        store.allocate(Attribute::Constitution, 7);
        assert_eq!(store.reset(), 10);
        assert_eq!(store.available_points(), 10);
        assert_eq!(store.total_invested(), 0);
        assert_eq!(*store.attributes(), Attributes::default());
    }

    #[test]
    fn test_grant_points() {
        let mut store = AttributeStore::new(5);
        store.grant_points(5);
        assert_eq!(store.available_points(), 10);
    }

    #[test]
    fn test_set_clamps_negative() {
        let mut store = AttributeStore::new(0);
        store.set(Attribute::Agility, -20);
        assert_eq!(store.get(Attribute::Agility), 0);
        assert_eq!(store.total_invested(), 0);
        store.set(Attribute::Strength, 18);
        assert_eq!(store.total_invested(), 8);
    }

    #[test]
    fn test_set_below_baseline_desyncs_refund() {
        // Deficit below baseline is not charged against other investment
        let mut store = AttributeStore::new(4);
        store.allocate(Attribute::Strength, 4);
        store.set(Attribute::Agility, 5);
        assert_eq!(store.total_invested(), 4);
        assert_eq!(store.reset(), 4);
        assert_eq!(store.get(Attribute::Agility), 10);
        assert_eq!(store.available_points(), 4);
    }

    #[test]
    fn test_from_parts() {
        let mut attrs = Attributes::default();
        attrs.intelligence = 25;
        let store = AttributeStore::from_parts(attrs, 2, 10);
        assert_eq!(store.total_invested(), 15);
        assert_eq!(store.available_points(), 2);
    }

    #[test]
    fn test_allocate_past_u32_max_is_noop() {
        let mut store = AttributeStore::new(5);
        store.set(Attribute::Strength, i64::MAX);
        assert_eq!(store.get(Attribute::Strength), u32::MAX);
        let invested = store.total_invested();

        assert!(!store.allocate(Attribute::Strength, 1));
        assert_eq!(store.get(Attribute::Strength), u32::MAX);
        assert_eq!(store.available_points(), 5);
        assert_eq!(store.total_invested(), invested);
        assert!(store.allocate(Attribute::Agility, 5));
    }

    #[test]
    fn test_huge_values_saturate_invested_total() {
        let store = AttributeStore::from_parts(Attributes::uniform(1_000_000_000), 0, 10);
        assert_eq!(store.total_invested(), u32::MAX);
    }

    #[test]
    fn test_reset_refund_saturates_bank() {
        let mut attrs = Attributes::default();
        attrs.strength = 20;
        let mut store = AttributeStore::from_parts(attrs, u32::MAX, 10);
        assert_eq!(store.reset(), 10);
        assert_eq!(store.available_points(), u32::MAX);
        assert_eq!(*store.attributes(), Attributes::default());
        assert_eq!(store.total_invested(), 0);
    }

    #[test]
    fn test_effects_pivot_on_default_not_baseline() {
        let raised = AttributeStore::with_baseline(12, 0);
        assert_eq!(raised.total_invested(), 0);
        let effects = raised.effects();
        assert_eq!(effects, aggregate(&Attributes::uniform(12)));
        assert!((effects.weapon_damage_multiplier - 1.04).abs() < 1e-9);

        let default = AttributeStore::new(0).effects();
        assert_eq!(default.weapon_damage_multiplier, 1.0);
        assert_eq!(default.dodge_chance, 0.0);
    }

    #[test]
    fn test_descriptions_cover_all_attributes() {
        let store = AttributeStore::new(0);
        let descriptions = store.get_all_attribute_descriptions();
        assert_eq!(descriptions.len(), 5);
        assert!(descriptions.iter().all(|d| d.value == 10));
    }

    fn attribute_strategy() -> impl Strategy<Value = Attribute> {
        prop::sample::select(Attribute::all().to_vec())
    }

    proptest! {
        #[test]
        fn prop_allocate_accounting(
            start in 0u32..50,
            attr in attribute_strategy(),
            amount in 0u32..80,
        ) {
            let mut store = AttributeStore::new(start);
            let ok = store.allocate(attr, amount);
            if amount > 0 && amount <= start {
                prop_assert!(ok);
                prop_assert_eq!(store.get(attr), 10 + amount);
                prop_assert_eq!(store.available_points(), start - amount);
            } else {
                prop_assert!(!ok);
                prop_assert_eq!(store.get(attr), 10);
                prop_assert_eq!(store.available_points(), start);
            }
            prop_assert_eq!(store.total_invested(), store.attributes().invested_above(10));
        }

        #[test]
        fn prop_reset_is_order_independent(
            start in 0u32..100,
            steps in prop::collection::vec((attribute_strategy(), 1u32..10), 0..20),
        ) {
            let mut forward = AttributeStore::new(start);
            let mut backward = AttributeStore::new(start);
            let mut allocated = 0;
            for (attr, amount) in &steps {
                if forward.allocate(*attr, *amount) {
                    allocated += amount;
                }
            }
            for (attr, amount) in steps.iter().rev() {
                backward.allocate(*attr, *amount);
            }
            forward.reset();
            backward.reset();
            prop_assert_eq!(forward.available_points(), start);
            prop_assert_eq!(backward.available_points(), start);
            prop_assert_eq!(*forward.attributes(), Attributes::default());
            prop_assert!(allocated <= start);
        }
    }
}
