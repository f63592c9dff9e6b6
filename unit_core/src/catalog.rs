//! UnitCatalog - static unit metadata and the upgrade graph
//!
//! Every unit type has exactly one catalog entry. The forward edges come from
//! each entry's [`UpgradeTarget`]; the backward edges (child -> parent) are
//! derived once at construction so path queries never search the graph.

use crate::types::{Tier, UnitCategory, UnitType, UpgradeTarget};
use crate::UnitError;
use serde::Serialize;

/// Static metadata for one unit type
#[derive(Debug, Clone, Serialize)]
pub struct UnitInfo {
    pub unit_type: UnitType,
    pub tier: Tier,
    pub category: UnitCategory,
    pub upgrade: UpgradeTarget,
    pub description: &'static str,
}

impl UnitInfo {
    fn new(
        unit_type: UnitType,
        tier: Tier,
        category: UnitCategory,
        upgrade: UpgradeTarget,
        description: &'static str,
    ) -> Self {
        UnitInfo {
            unit_type,
            tier,
            category,
            upgrade,
            description,
        }
    }
}

/// Read-only unit catalog
#[derive(Debug, Clone)]
pub struct UnitCatalog {
    /// Indexed by `UnitType::index`
    units: Vec<UnitInfo>,
    /// Upgrade predecessor, indexed by `UnitType::index`
    parents: Vec<Option<UnitType>>,
}

impl UnitCatalog {
    /// Build a catalog from explicit entries
    ///
    /// Fails if a unit is missing or listed twice, if an upgrade does not go
    /// to a strictly higher tier, or if a unit is reachable from two parents.
    pub fn from_units(entries: Vec<UnitInfo>) -> Result<Self, UnitError> {
        let mut slots: Vec<Option<UnitInfo>> = vec![None; UnitType::COUNT];
        for info in entries {
            let slot = &mut slots[info.unit_type.index()];
            if slot.is_some() {
                return Err(UnitError::DuplicateUnit(info.unit_type));
            }
            *slot = Some(info);
        }

        let mut units = Vec::with_capacity(UnitType::COUNT);
        for (i, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(info) => units.push(info),
                None => {
                    // from_index cannot fail for i < COUNT
                    let missing = UnitType::all()[i];
                    return Err(UnitError::MissingUnit(missing));
                }
            }
        }

        let mut parents: Vec<Option<UnitType>> = vec![None; UnitType::COUNT];
        for info in &units {
            for &target in info.upgrade.options() {
                let target_tier = units[target.index()].tier;
                if target_tier <= info.tier {
                    return Err(UnitError::InvalidUpgrade {
                        from: info.unit_type,
                        to: target,
                    });
                }
                let parent = &mut parents[target.index()];
                if parent.is_some() {
                    return Err(UnitError::MultipleParents(target));
                }
                *parent = Some(info.unit_type);
            }
        }

        Ok(UnitCatalog { units, parents })
    }

    /// The standard unit roster
    pub fn standard() -> Self {
        use Tier::*;
        use UnitCategory::*;
        use UnitType::*;

        let entries = vec![
            UnitInfo::new(Swordsman, Base, Infantry, UpgradeTarget::Branch(vec![HeavyInfantry, Berserker]), "Versatile sword infantry."),
            UnitInfo::new(Spearman, Base, Infantry, UpgradeTarget::Single(Pikeman), "Braced spears that break cavalry charges."),
            UnitInfo::new(Archer, Base, Ranged, UpgradeTarget::Branch(vec![Longbowman, Crossbowman]), "Light bowmen."),
            UnitInfo::new(Apprentice, Base, Ranged, UpgradeTarget::Single(BattleMage), "Novice spellcaster."),
            UnitInfo::new(LightCavalry, Base, Cavalry, UpgradeTarget::Branch(vec![HeavyCavalry, HorseArcher]), "Fast riders that run down archers."),
            UnitInfo::new(HeavyInfantry, Advanced, Infantry, UpgradeTarget::Single(Guardian), "Shielded line infantry."),
            UnitInfo::new(Berserker, Advanced, Infantry, UpgradeTarget::Single(Warlord), "Reckless two-handed fighters."),
            UnitInfo::new(Pikeman, Advanced, Infantry, UpgradeTarget::Single(Halberdier), "Long pikes, deadly to any mount."),
            UnitInfo::new(Longbowman, Advanced, Ranged, UpgradeTarget::Single(Marksman), "Long-range volley archers."),
            UnitInfo::new(Crossbowman, Advanced, Ranged, UpgradeTarget::Single(Arbalest), "Armour-piercing bolts."),
            UnitInfo::new(BattleMage, Advanced, Ranged, UpgradeTarget::Single(Archmage), "Battlefield evoker."),
            UnitInfo::new(HeavyCavalry, Advanced, Cavalry, UpgradeTarget::Single(Cataphract), "Armoured lancers."),
            UnitInfo::new(HorseArcher, Advanced, Cavalry, UpgradeTarget::None, "Mounted skirmishers."),
            UnitInfo::new(Guardian, Max, Infantry, UpgradeTarget::None, "Elite defenders."),
            UnitInfo::new(Warlord, Max, Infantry, UpgradeTarget::None, "Elite shock infantry."),
            UnitInfo::new(Halberdier, Max, Infantry, UpgradeTarget::None, "Elite polearm infantry."),
            UnitInfo::new(Marksman, Max, Ranged, UpgradeTarget::None, "Elite sharpshooters."),
            UnitInfo::new(Arbalest, Max, Ranged, UpgradeTarget::None, "Elite siege crossbowmen."),
            UnitInfo::new(Archmage, Max, Ranged, UpgradeTarget::None, "Master of the arcane."),
            UnitInfo::new(Cataphract, Max, Cavalry, UpgradeTarget::None, "Elite armoured cavalry."),
        ];

        // The standard roster is validated by the catalog tests
        match Self::from_units(entries) {
            Ok(catalog) => catalog,
            Err(e) => panic!("standard unit roster is invalid: {}", e),
        }
    }

    /// Metadata for a unit
    pub fn info(&self, unit: UnitType) -> &UnitInfo {
        &self.units[unit.index()]
    }

    /// All entries in index order
    pub fn all(&self) -> &[UnitInfo] {
        &self.units
    }

    pub fn tier(&self, unit: UnitType) -> Tier {
        self.info(unit).tier
    }

    pub fn category(&self, unit: UnitType) -> UnitCategory {
        self.info(unit).category
    }

    pub fn is_max_tier(&self, unit: UnitType) -> bool {
        self.tier(unit) == Tier::Max
    }

    /// Check if a unit has any promotion available
    pub fn can_upgrade(&self, unit: UnitType) -> bool {
        !self.info(unit).upgrade.is_none()
    }

    /// Promotion choices (one for a linear chain, several for a branch)
    pub fn get_upgrade_options(&self, unit: UnitType) -> &[UnitType] {
        self.info(unit).upgrade.options()
    }

    /// Promote a unit
    ///
    /// A linear chain only accepts choice 0; a branch accepts any index into
    /// its option list.
    pub fn upgrade(&self, unit: UnitType, choice: usize) -> Result<UnitType, UnitError> {
        let options = self.get_upgrade_options(unit);
        if options.is_empty() {
            return Err(UnitError::NoUpgrade(unit));
        }
        options
            .get(choice)
            .copied()
            .ok_or(UnitError::InvalidChoice {
                unit,
                choice,
                options: options.len(),
            })
    }

    /// Direct predecessor in the upgrade graph
    pub fn parent(&self, unit: UnitType) -> Option<UnitType> {
        self.parents[unit.index()]
    }

    /// Upgrade path from the tier-1 ancestor down to `unit` (inclusive)
    pub fn get_upgrade_path(&self, unit: UnitType) -> Vec<UnitType> {
        let mut path = vec![unit];
        let mut current = unit;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }

    /// Tier-1 ancestor of a unit (the unit itself if it has no parent)
    pub fn get_base_unit_type(&self, unit: UnitType) -> UnitType {
        let mut current = unit;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    pub fn units_in_tier(&self, tier: Tier) -> Vec<UnitType> {
        self.units
            .iter()
            .filter(|u| u.tier == tier)
            .map(|u| u.unit_type)
            .collect()
    }

    pub fn units_in_category(&self, category: UnitCategory) -> Vec<UnitType> {
        self.units
            .iter()
            .filter(|u| u.category == category)
            .map(|u| u.unit_type)
            .collect()
    }
}

impl Default for UnitCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_is_valid() {
        let entries = UnitCatalog::standard().all().to_vec();
        assert!(UnitCatalog::from_units(entries).is_ok());
    }

    #[test]
    fn test_base_units_have_no_parent() {
        let catalog = UnitCatalog::standard();
        for unit in catalog.units_in_tier(Tier::Base) {
            assert_eq!(catalog.parent(unit), None);
            assert_eq!(catalog.get_base_unit_type(unit), unit);
        }
        for unit in UnitType::all() {
            if catalog.tier(*unit) != Tier::Base {
                assert!(catalog.parent(*unit).is_some(), "{} is unreachable", unit);
            }
        }
    }

    #[test]
    fn test_linear_upgrade() {
        let catalog = UnitCatalog::standard();
        assert!(catalog.can_upgrade(UnitType::Spearman));
        assert_eq!(catalog.get_upgrade_options(UnitType::Spearman), &[UnitType::Pikeman]);
        assert_eq!(catalog.upgrade(UnitType::Spearman, 0).unwrap(), UnitType::Pikeman);
        assert!(matches!(
            catalog.upgrade(UnitType::Spearman, 1),
            Err(UnitError::InvalidChoice { choice: 1, options: 1, .. })
        ));
    }

    #[test]
    fn test_branch_upgrade() {
        let catalog = UnitCatalog::standard();
        let options = catalog.get_upgrade_options(UnitType::Archer);
        assert_eq!(options, &[UnitType::Longbowman, UnitType::Crossbowman]);
        assert_eq!(catalog.upgrade(UnitType::Archer, 1).unwrap(), UnitType::Crossbowman);
        assert!(catalog.upgrade(UnitType::Archer, 2).is_err());
    }

    #[test]
    fn test_terminal_units_cannot_upgrade() {
        let catalog = UnitCatalog::standard();
        for unit in catalog.units_in_tier(Tier::Max) {
            assert!(!catalog.can_upgrade(unit));
            assert!(matches!(catalog.upgrade(unit, 0), Err(UnitError::NoUpgrade(_))));
        }
        assert!(!catalog.can_upgrade(UnitType::HorseArcher));
    }

    #[test]
    fn test_upgrade_path() {
        let catalog = UnitCatalog::standard();
        assert_eq!(
            catalog.get_upgrade_path(UnitType::Guardian),
            vec![UnitType::Swordsman, UnitType::HeavyInfantry, UnitType::Guardian]
        );
        assert_eq!(catalog.get_upgrade_path(UnitType::Archer), vec![UnitType::Archer]);
        assert_eq!(catalog.get_base_unit_type(UnitType::Cataphract), UnitType::LightCavalry);
        assert_eq!(catalog.get_base_unit_type(UnitType::Arbalest), UnitType::Archer);
    }

    #[test]
    fn test_duplicate_unit_rejected() {
        let mut entries = UnitCatalog::standard().all().to_vec();
        entries.push(entries[0].clone());
        assert!(matches!(
            UnitCatalog::from_units(entries),
            Err(UnitError::DuplicateUnit(UnitType::Swordsman))
        ));
    }

    #[test]
    fn test_missing_unit_rejected() {
        let mut entries = UnitCatalog::standard().all().to_vec();
        entries.retain(|u| u.unit_type != UnitType::Marksman);
        assert!(matches!(
            UnitCatalog::from_units(entries),
            Err(UnitError::MissingUnit(UnitType::Marksman))
        ));
    }

    #[test]
    fn test_downward_upgrade_rejected() {
        let mut entries = UnitCatalog::standard().all().to_vec();
        entries[UnitType::Guardian.index()].upgrade = UpgradeTarget::Single(UnitType::Swordsman);
        assert!(matches!(
            UnitCatalog::from_units(entries),
            Err(UnitError::InvalidUpgrade { .. })
        ));
    }

    #[test]
    fn test_shared_child_rejected() {
        let mut entries = UnitCatalog::standard().all().to_vec();
        entries[UnitType::HorseArcher.index()].upgrade = UpgradeTarget::Single(UnitType::Cataphract);
        assert!(matches!(
            UnitCatalog::from_units(entries),
            Err(UnitError::MultipleParents(UnitType::Cataphract))
        ));
    }

    #[test]
    fn test_category_lookup() {
        let catalog = UnitCatalog::standard();
        let cavalry = catalog.units_in_category(UnitCategory::Cavalry);
        assert!(cavalry.contains(&UnitType::LightCavalry));
        assert!(cavalry.contains(&UnitType::Cataphract));
        assert!(!cavalry.contains(&UnitType::Archer));
    }
}
