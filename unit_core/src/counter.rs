//! CounterMatrix - precomputed rock-paper-scissors damage multipliers
//!
//! Construction:
//! - every cell starts at [`NEUTRAL`]
//! - for each rule (attacker, defenders): `M[attacker][defender] = ADVANTAGE`
//!   and `M[defender][attacker] = DISADVANTAGE`
//!
//! Max-tier units never take part in a rule, on either side.
//!
//! Damage: `max(1, floor(base * M[attacker][defender]))`

use crate::catalog::UnitCatalog;
use crate::types::UnitType;
use serde::{Deserialize, Serialize};

/// Multiplier for an undeclared matchup
pub const NEUTRAL: f64 = 1.0;
/// Multiplier for an attacker hitting a unit it counters
pub const ADVANTAGE: f64 = 1.3;
/// Multiplier for a countered unit hitting back
pub const DISADVANTAGE: f64 = 0.8;

/// One declared counter relationship
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRule {
    pub attacker: UnitType,
    pub defenders: Vec<UnitType>,
}

impl CounterRule {
    pub fn new(attacker: UnitType, defenders: Vec<UnitType>) -> Self {
        CounterRule { attacker, defenders }
    }
}

/// The standard counter rules for [`UnitCatalog::standard`]
pub fn standard_rules() -> Vec<CounterRule> {
    use UnitType::*;
    vec![
        CounterRule::new(Spearman, vec![LightCavalry, HeavyCavalry]),
        CounterRule::new(Pikeman, vec![LightCavalry, HeavyCavalry, HorseArcher]),
        CounterRule::new(Swordsman, vec![Spearman, Pikeman]),
        CounterRule::new(Berserker, vec![Swordsman, Spearman, Apprentice]),
        CounterRule::new(HeavyInfantry, vec![Archer, Longbowman]),
        CounterRule::new(Archer, vec![Swordsman, Spearman]),
        CounterRule::new(Longbowman, vec![Spearman, Pikeman, Swordsman, Berserker]),
        CounterRule::new(Crossbowman, vec![HeavyInfantry, HeavyCavalry]),
        CounterRule::new(Apprentice, vec![HeavyInfantry]),
        CounterRule::new(BattleMage, vec![HeavyInfantry, Pikeman, HeavyCavalry]),
        CounterRule::new(LightCavalry, vec![Archer, Crossbowman, Apprentice]),
        CounterRule::new(HeavyCavalry, vec![Swordsman, Berserker, Archer]),
        CounterRule::new(HorseArcher, vec![Spearman, HeavyInfantry, Apprentice]),
    ]
}

/// Square attacker x defender multiplier table
#[derive(Debug, Clone)]
pub struct CounterMatrix {
    cells: [[f64; UnitType::COUNT]; UnitType::COUNT],
}

impl CounterMatrix {
    /// A matrix where every matchup is neutral
    pub fn neutral() -> Self {
        CounterMatrix {
            cells: [[NEUTRAL; UnitType::COUNT]; UnitType::COUNT],
        }
    }

    /// Build the matrix from declared rules
    ///
    /// Pairs involving a max-tier unit (per `catalog`) are skipped so those
    /// units stay neutral against everything.
    pub fn build(catalog: &UnitCatalog, rules: &[CounterRule]) -> Self {
        let mut matrix = Self::neutral();
        for rule in rules {
            if catalog.is_max_tier(rule.attacker) {
                continue;
            }
            let a = rule.attacker.index();
            for defender in &rule.defenders {
                if catalog.is_max_tier(*defender) || *defender == rule.attacker {
                    continue;
                }
                let d = defender.index();
                matrix.cells[a][d] = ADVANTAGE;
                matrix.cells[d][a] = DISADVANTAGE;
            }
        }
        matrix
    }

    /// The standard matrix over the standard roster
    pub fn standard() -> Self {
        Self::build(&UnitCatalog::standard(), &standard_rules())
    }

    /// Multiplier for `attacker` hitting `defender`
    pub fn multiplier(&self, attacker: UnitType, defender: UnitType) -> f64 {
        self.cells[attacker.index()][defender.index()]
    }

    /// Multiplier by raw index; out-of-range indices read as neutral
    pub fn multiplier_by_index(&self, attacker: usize, defender: usize) -> f64 {
        self.cells
            .get(attacker)
            .and_then(|row| row.get(defender))
            .copied()
            .unwrap_or(NEUTRAL)
    }

    /// Final damage for one hit, never below 1
    pub fn damage(&self, attacker: UnitType, defender: UnitType, base_damage: f64) -> f64 {
        apply_multiplier(base_damage, self.multiplier(attacker, defender))
    }

    /// Units this attacker has the advantage against
    pub fn counters_of(&self, attacker: UnitType) -> Vec<UnitType> {
        UnitType::all()
            .iter()
            .copied()
            .filter(|d| self.multiplier(attacker, *d) > NEUTRAL)
            .collect()
    }

    /// Units that have the advantage against this defender
    pub fn countered_by(&self, defender: UnitType) -> Vec<UnitType> {
        UnitType::all()
            .iter()
            .copied()
            .filter(|a| self.multiplier(*a, defender) > NEUTRAL)
            .collect()
    }
}

impl Default for CounterMatrix {
    fn default() -> Self {
        Self::standard()
    }
}

/// `max(1, floor(base * multiplier))`
pub fn apply_multiplier(base_damage: f64, multiplier: f64) -> f64 {
    (base_damage * multiplier).floor().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tier;
    use proptest::prelude::*;

    #[test]
    fn test_spearman_vs_light_cavalry() {
        let matrix = CounterMatrix::standard();
        assert!((matrix.multiplier(UnitType::Spearman, UnitType::LightCavalry) - 1.3).abs() < f64::EPSILON);
        assert!((matrix.damage(UnitType::Spearman, UnitType::LightCavalry, 100.0) - 130.0).abs() < f64::EPSILON);
        assert!((matrix.damage(UnitType::LightCavalry, UnitType::Spearman, 100.0) - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_every_declared_pair() {
        let matrix = CounterMatrix::standard();
        for rule in standard_rules() {
            for defender in &rule.defenders {
                assert!(
                    (matrix.multiplier(rule.attacker, *defender) - ADVANTAGE).abs() < f64::EPSILON,
                    "{} vs {}",
                    rule.attacker,
                    defender
                );
                assert!(
                    (matrix.multiplier(*defender, rule.attacker) - DISADVANTAGE).abs() < f64::EPSILON,
                    "{} vs {}",
                    defender,
                    rule.attacker
                );
            }
        }
    }

    #[test]
    fn test_undeclared_pairs_neutral() {
        let matrix = CounterMatrix::standard();
        let rules = standard_rules();
        let declared = |a: UnitType, d: UnitType| {
            rules
                .iter()
                .any(|r| (r.attacker == a && r.defenders.contains(&d)) || (r.attacker == d && r.defenders.contains(&a)))
        };
        for a in UnitType::all() {
            for d in UnitType::all() {
                if !declared(*a, *d) {
                    assert!((matrix.multiplier(*a, *d) - NEUTRAL).abs() < f64::EPSILON);
                }
            }
        }
    }

    #[test]
    fn test_max_tier_is_counter_immune() {
        let catalog = UnitCatalog::standard();
        let matrix = CounterMatrix::standard();
        for elite in catalog.units_in_tier(Tier::Max) {
            for other in UnitType::all() {
                assert!((matrix.multiplier(elite, *other) - NEUTRAL).abs() < f64::EPSILON);
                assert!((matrix.multiplier(*other, elite) - NEUTRAL).abs() < f64::EPSILON);
            }
        }
    }

    #[test]
    fn test_rules_naming_max_tier_are_ignored() {
        let catalog = UnitCatalog::standard();
        let rules = vec![
            CounterRule::new(UnitType::Guardian, vec![UnitType::Archer]),
            CounterRule::new(UnitType::Archer, vec![UnitType::Cataphract]),
        ];
        let matrix = CounterMatrix::build(&catalog, &rules);
        assert!((matrix.multiplier(UnitType::Guardian, UnitType::Archer) - NEUTRAL).abs() < f64::EPSILON);
        assert!((matrix.multiplier(UnitType::Archer, UnitType::Cataphract) - NEUTRAL).abs() < f64::EPSILON);
    }

    #[test]
    fn test_out_of_range_index_is_neutral() {
        let matrix = CounterMatrix::standard();
        let spear = UnitType::Spearman.index();
        let cav = UnitType::LightCavalry.index();
        assert!((matrix.multiplier_by_index(spear, cav) - ADVANTAGE).abs() < f64::EPSILON);
        assert!((matrix.multiplier_by_index(UnitType::COUNT, cav) - NEUTRAL).abs() < f64::EPSILON);
        assert!((matrix.multiplier_by_index(spear, usize::MAX) - NEUTRAL).abs() < f64::EPSILON);
    }

    #[test]
    fn test_counter_queries() {
        let matrix = CounterMatrix::standard();
        let beats = matrix.counters_of(UnitType::Spearman);
        assert_eq!(beats, vec![UnitType::LightCavalry, UnitType::HeavyCavalry]);
        let threats = matrix.countered_by(UnitType::LightCavalry);
        assert_eq!(threats, vec![UnitType::Spearman, UnitType::Pikeman]);
    }

    #[test]
    fn test_zero_damage_floors_to_one() {
        let matrix = CounterMatrix::standard();
        assert!((matrix.damage(UnitType::LightCavalry, UnitType::Spearman, 0.0) - 1.0).abs() < f64::EPSILON);
        assert!((matrix.damage(UnitType::LightCavalry, UnitType::Spearman, 1.0) - 1.0).abs() < f64::EPSILON);
    }

    proptest! {
        #[test]
        fn prop_damage_at_least_one(
            a in 0usize..UnitType::COUNT,
            d in 0usize..UnitType::COUNT,
            base in 0.0f64..100_000.0,
        ) {
            let matrix = CounterMatrix::standard();
            let attacker = UnitType::from_index(a).unwrap();
            let defender = UnitType::from_index(d).unwrap();
            prop_assert!(matrix.damage(attacker, defender, base) >= 1.0);
        }

        #[test]
        fn prop_damage_is_floored_product(base in 1.0f64..10_000.0) {
            let matrix = CounterMatrix::standard();
            let dmg = matrix.damage(UnitType::Spearman, UnitType::LightCavalry, base);
            prop_assert!((dmg - (base * ADVANTAGE).floor().max(1.0)).abs() < f64::EPSILON);
            prop_assert!(dmg.fract() == 0.0);
        }
    }
}
