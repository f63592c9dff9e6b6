//! ProgressionFacade - composition root over classes, attributes and skills
//!
//! The facade owns the immutable catalogs it is built with and a table of
//! per-character state keyed by character id. The character record itself
//! (level, skill points) stays with the host and is passed into the calls
//! that need it.

use crate::attribute::{Attribute, AttributeDescription, AttributeStore, Attributes};
use crate::character::CharacterRecord;
use crate::class::{ClassCatalog, ClassDefinition, Specialization};
use crate::config::{ConfigError, ProgressionConstants};
use crate::skill::{
    ActiveSkill, EffectBundle, LayoutInfo, NodeView, SkillProgress, SkillTreeRegistry, SkillTreeTemplate,
};
use crate::stats::FinalStats;
use crate::ProgressionError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, error, info, warn};
use unit_core::{counter, CounterMatrix, UnitCatalog, UnitInfo, UnitType};

/// Progression state owned by one character
#[derive(Debug, Clone)]
pub struct CharacterProgress {
    class_id: String,
    specialization: Option<String>,
    unit_type: UnitType,
    attributes: AttributeStore,
    skills: SkillProgress,
}

impl CharacterProgress {
    pub fn class_id(&self) -> &str {
        &self.class_id
    }

    pub fn specialization(&self) -> Option<&str> {
        self.specialization.as_deref()
    }

    /// Unit type the character currently fields
    pub fn unit_type(&self) -> UnitType {
        self.unit_type
    }

    pub fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    pub fn skills(&self) -> &SkillProgress {
        &self.skills
    }
}

/// Everything needed to rebuild a character's progression verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    pub class_id: String,
    #[serde(default)]
    pub specialization: Option<String>,
    pub attributes: Attributes,
    pub available_points: u32,
    #[serde(default)]
    pub skill_levels: BTreeMap<String, u32>,
}

/// Entry point for every progression operation
#[derive(Debug)]
pub struct ProgressionFacade {
    constants: ProgressionConstants,
    classes: ClassCatalog,
    trees: SkillTreeRegistry,
    units: UnitCatalog,
    counters: CounterMatrix,
    characters: HashMap<String, CharacterProgress>,
}

impl ProgressionFacade {
    /// Build a facade over the given content
    ///
    /// Every class must have a skill tree containing the skills it refers to.
    pub fn new(
        constants: ProgressionConstants,
        classes: ClassCatalog,
        trees: SkillTreeRegistry,
        units: UnitCatalog,
        counters: CounterMatrix,
    ) -> Result<Self, ConfigError> {
        if let Err(e) = classes.validate_skills(&trees) {
            error!(error = %e, "class catalog does not match skill trees");
            return Err(e);
        }
        info!(classes = classes.len(), trees = trees.len(), "progression content ready");
        Ok(ProgressionFacade {
            constants,
            classes,
            trees,
            units,
            counters,
            characters: HashMap::new(),
        })
    }

    /// Facade over the built-in classes, trees, unit roster and counter rules
    pub fn with_builtin_content(constants: ProgressionConstants) -> Result<Self, ConfigError> {
        let units = UnitCatalog::standard();
        let counters = CounterMatrix::build(&units, &counter::standard_rules());
        Self::new(
            constants,
            ClassCatalog::builtin()?,
            SkillTreeRegistry::builtin()?,
            units,
            counters,
        )
    }

    pub fn constants(&self) -> &ProgressionConstants {
        &self.constants
    }

    pub fn class_catalog(&self) -> &ClassCatalog {
        &self.classes
    }

    pub fn skill_trees(&self) -> &SkillTreeRegistry {
        &self.trees
    }

    pub fn unit_catalog(&self) -> &UnitCatalog {
        &self.units
    }

    pub fn counter_matrix(&self) -> &CounterMatrix {
        &self.counters
    }

    /// Every class template, for class selection screens
    pub fn get_all_classes(&self) -> &[ClassDefinition] {
        self.classes.get_all_classes()
    }

    pub fn character(&self, id: &str) -> Option<&CharacterProgress> {
        self.characters.get(id)
    }

    pub fn character_ids(&self) -> impl Iterator<Item = &str> {
        self.characters.keys().map(|s| s.as_str())
    }

    /// Drop all progression state for a character
    pub fn remove_character(&mut self, id: &str) -> Option<CharacterProgress> {
        let removed = self.characters.remove(id);
        if removed.is_some() {
            debug!(character = id, "removed character");
        }
        removed
    }

    // === Class and specialization ===

    /// Choose a class for a character that has none yet
    pub fn select_class(&mut self, id: &str, class_id: &str) -> Result<(), ProgressionError> {
        if let Some(progress) = self.characters.get(id) {
            warn!(character = id, current = %progress.class_id, "class already selected");
            return Err(ProgressionError::ClassAlreadySelected {
                character: id.to_string(),
                class: progress.class_id.clone(),
            });
        }
        let class = self.class(class_id)?;
        let tree = self.tree(class_id)?;

        let progress = CharacterProgress {
            class_id: class.id.clone(),
            specialization: None,
            unit_type: class.base_unit,
            attributes: AttributeStore::with_baseline(
                self.constants.attribute_baseline,
                self.constants.starting_attribute_points,
            ),
            skills: tree.new_progress(),
        };
        self.characters.insert(id.to_string(), progress);

        debug!(character = id, class = class_id, "selected class");
        Ok(())
    }

    /// Specializations the character could pick at `level`
    ///
    /// Empty once a specialization has been chosen.
    pub fn get_available_specializations(
        &self,
        id: &str,
        level: u32,
    ) -> Result<Vec<&Specialization>, ProgressionError> {
        let progress = self.progress(id)?;
        if progress.specialization.is_some() {
            return Ok(Vec::new());
        }
        Ok(self.class(&progress.class_id)?.available_specializations(level))
    }

    /// Lock in a specialization, fixing the character's unit type
    pub fn select_specialization(
        &mut self,
        id: &str,
        spec_id: &str,
        level: u32,
    ) -> Result<(), ProgressionError> {
        let progress = self.progress(id)?;
        if let Some(current) = &progress.specialization {
            warn!(character = id, current = %current, "specialization already selected");
            return Err(ProgressionError::AlreadySpecialized {
                character: id.to_string(),
                specialization: current.clone(),
            });
        }

        let class = self.class(&progress.class_id)?;
        let spec = class.specialization(spec_id).ok_or_else(|| {
            warn!(character = id, class = %class.id, specialization = spec_id, "unknown specialization");
            ProgressionError::UnknownSpecialization {
                class: class.id.clone(),
                specialization: spec_id.to_string(),
            }
        })?;
        if level < spec.required_level {
            return Err(ProgressionError::LevelTooLow {
                required: spec.required_level,
                actual: level,
            });
        }

        let unit_type = spec.unit_type.unwrap_or(class.base_unit);
        let chosen = spec.id.clone();
        let progress = self.progress_mut(id)?;
        progress.specialization = Some(chosen);
        progress.unit_type = unit_type;

        debug!(character = id, specialization = spec_id, unit = %unit_type, "selected specialization");
        Ok(())
    }

    /// The unit type a character fields
    pub fn unit_type(&self, id: &str) -> Result<UnitType, ProgressionError> {
        Ok(self.progress(id)?.unit_type)
    }

    /// Catalog metadata (tier, category, upgrade target) for a character's unit
    pub fn unit_info(&self, id: &str) -> Result<&UnitInfo, ProgressionError> {
        Ok(self.units.info(self.progress(id)?.unit_type))
    }

    /// Damage of one hit from the character's unit against `defender`
    ///
    /// Applies the counter multiplier for the character's current unit type,
    /// so a specialization that changes the unit changes the matchups.
    pub fn damage_against(
        &self,
        id: &str,
        defender: UnitType,
        base_damage: f64,
    ) -> Result<f64, ProgressionError> {
        let attacker = self.progress(id)?.unit_type;
        Ok(self.counters.damage(attacker, defender, base_damage))
    }

    // === Attributes ===

    /// Spend attribute points
    pub fn allocate_attribute(
        &mut self,
        id: &str,
        attribute: Attribute,
        amount: u32,
    ) -> Result<(), ProgressionError> {
        let store = &mut self.progress_mut(id)?.attributes;
        if !store.allocate(attribute, amount) {
            return Err(ProgressionError::AllocationFailed {
                attribute,
                requested: amount,
                available: store.available_points(),
            });
        }
        Ok(())
    }

    /// Return every attribute to baseline, refunding the points
    ///
    /// Returns the number of points refunded.
    pub fn reset_attributes(&mut self, id: &str) -> Result<u32, ProgressionError> {
        Ok(self.progress_mut(id)?.attributes.reset())
    }

    /// Grant the per-level attribute points
    ///
    /// Skill points come from the character record, not from here. Returns the
    /// number of points granted.
    pub fn on_level_up(&mut self, id: &str, level: u32) -> Result<u32, ProgressionError> {
        let granted = self.constants.attribute_points_per_level;
        self.progress_mut(id)?.attributes.grant_points(granted);
        debug!(character = id, level, granted, "level up");
        Ok(granted)
    }

    pub fn get_all_attribute_descriptions(
        &self,
        id: &str,
    ) -> Result<Vec<AttributeDescription>, ProgressionError> {
        Ok(self.progress(id)?.attributes.get_all_attribute_descriptions())
    }

    // === Skills ===

    pub fn can_learn_skill(&self, id: &str, character: &impl CharacterRecord, node_id: &str) -> bool {
        let Ok(progress) = self.progress(id) else {
            return false;
        };
        self.tree(&progress.class_id)
            .map(|tree| tree.can_learn(&progress.skills, character, node_id))
            .unwrap_or(false)
    }

    /// Learn one level of a skill node, spending the character's skill points
    ///
    /// Returns the node's new level.
    pub fn learn_skill(
        &mut self,
        id: &str,
        character: &mut impl CharacterRecord,
        node_id: &str,
    ) -> Result<u32, ProgressionError> {
        let progress = self.characters.get_mut(id).ok_or_else(|| unknown_character(id))?;
        check_class_tag(id, progress, &*character)?;
        let tree = self.trees.get(&progress.class_id).ok_or_else(|| missing_tree(&progress.class_id))?;

        tree.learn(&mut progress.skills, character, node_id).map_err(|e| {
            debug!(character = id, node = node_id, reason = %e, "cannot learn skill");
            ProgressionError::Learn(e)
        })
    }

    /// Unlearn every node, refunding skill points to the character
    ///
    /// Returns the number of points refunded.
    pub fn reset_skills(
        &mut self,
        id: &str,
        character: &mut impl CharacterRecord,
    ) -> Result<u32, ProgressionError> {
        let progress = self.characters.get_mut(id).ok_or_else(|| unknown_character(id))?;
        check_class_tag(id, progress, &*character)?;
        let tree = self.trees.get(&progress.class_id).ok_or_else(|| missing_tree(&progress.class_id))?;
        Ok(tree.reset_all_skills(&mut progress.skills, character))
    }

    /// Every node of the character's tree with its current state
    pub fn get_all_nodes(
        &self,
        id: &str,
        character: &impl CharacterRecord,
    ) -> Result<Vec<NodeView>, ProgressionError> {
        let progress = self.progress(id)?;
        Ok(self.tree(&progress.class_id)?.get_all_nodes(&progress.skills, character))
    }

    pub fn get_layout_info(&self, id: &str) -> Result<&LayoutInfo, ProgressionError> {
        let progress = self.progress(id)?;
        Ok(self.tree(&progress.class_id)?.get_layout_info())
    }

    pub fn get_passive_effects(&self, id: &str) -> Result<EffectBundle, ProgressionError> {
        let progress = self.progress(id)?;
        Ok(self.tree(&progress.class_id)?.get_passive_effects(&progress.skills))
    }

    pub fn get_active_skills(&self, id: &str) -> Result<Vec<ActiveSkill>, ProgressionError> {
        let progress = self.progress(id)?;
        Ok(self.tree(&progress.class_id)?.get_active_skills(&progress.skills))
    }

    // === Stats ===

    /// Compose the character's stat sheet at its current level
    ///
    /// Levels above the configured cap are treated as the cap.
    pub fn calculate_final_stats(
        &self,
        id: &str,
        character: &impl CharacterRecord,
    ) -> Result<FinalStats, ProgressionError> {
        let progress = self.progress(id)?;
        let class = self.class(&progress.class_id)?;
        let specialization = progress
            .specialization
            .as_deref()
            .and_then(|s| class.specialization(s));
        let passives = self.tree(&progress.class_id)?.get_passive_effects(&progress.skills);
        let level = character.level().min(self.constants.max_character_level);

        Ok(FinalStats::compute(
            class,
            specialization,
            level,
            &progress.attributes.effects(),
            passives,
        ))
    }

    // === Persistence ===

    /// Capture a character's progression for the host to persist
    pub fn snapshot(&self, id: &str) -> Result<CharacterSnapshot, ProgressionError> {
        let progress = self.progress(id)?;
        Ok(CharacterSnapshot {
            class_id: progress.class_id.clone(),
            specialization: progress.specialization.clone(),
            attributes: *progress.attributes.attributes(),
            available_points: progress.attributes.available_points(),
            skill_levels: progress.skills.levels().clone(),
        })
    }

    /// Rebuild a character from a snapshot, replacing any existing state
    pub fn restore(&mut self, id: &str, snapshot: CharacterSnapshot) -> Result<(), ProgressionError> {
        let class = self.class(&snapshot.class_id)?;
        let tree = self.tree(&snapshot.class_id)?;

        let unit_type = match &snapshot.specialization {
            Some(spec_id) => {
                let spec = class.specialization(spec_id).ok_or_else(|| {
                    warn!(character = id, class = %class.id, specialization = %spec_id, "unknown specialization in snapshot");
                    ProgressionError::UnknownSpecialization {
                        class: class.id.clone(),
                        specialization: spec_id.clone(),
                    }
                })?;
                spec.unit_type.unwrap_or(class.base_unit)
            }
            None => class.base_unit,
        };

        let skills = tree.restore_progress(&snapshot.skill_levels).map_err(|e| {
            warn!(character = id, error = %e, "invalid skill levels in snapshot");
            ProgressionError::InvalidSnapshot(e)
        })?;

        let progress = CharacterProgress {
            class_id: class.id.clone(),
            specialization: snapshot.specialization,
            unit_type,
            attributes: AttributeStore::from_parts(
                snapshot.attributes,
                snapshot.available_points,
                self.constants.attribute_baseline,
            ),
            skills,
        };
        self.characters.insert(id.to_string(), progress);

        debug!(character = id, class = %snapshot.class_id, "restored character");
        Ok(())
    }

    // === Lookups ===

    fn progress(&self, id: &str) -> Result<&CharacterProgress, ProgressionError> {
        self.characters.get(id).ok_or_else(|| unknown_character(id))
    }

    fn progress_mut(&mut self, id: &str) -> Result<&mut CharacterProgress, ProgressionError> {
        self.characters.get_mut(id).ok_or_else(|| unknown_character(id))
    }

    fn class(&self, class_id: &str) -> Result<&ClassDefinition, ProgressionError> {
        self.classes.get(class_id).ok_or_else(|| {
            warn!(class = class_id, "unknown class");
            ProgressionError::UnknownClass(class_id.to_string())
        })
    }

    fn tree(&self, class_id: &str) -> Result<&SkillTreeTemplate, ProgressionError> {
        self.trees.get(class_id).ok_or_else(|| missing_tree(class_id))
    }
}

fn unknown_character(id: &str) -> ProgressionError {
    warn!(character = id, "unknown character or no class selected");
    ProgressionError::UnknownCharacter(id.to_string())
}

fn missing_tree(class_id: &str) -> ProgressionError {
    error!(class = class_id, "class has no skill tree");
    ProgressionError::MissingSkillTree(class_id.to_string())
}

/// Reject a character record tagged with a different class
fn check_class_tag(
    id: &str,
    progress: &CharacterProgress,
    character: &impl CharacterRecord,
) -> Result<(), ProgressionError> {
    match character.class_id() {
        Some(tag) if tag != progress.class_id => {
            warn!(character = id, tag, class = %progress.class_id, "character record class mismatch");
            Err(ProgressionError::ClassMismatch {
                expected: progress.class_id.clone(),
                actual: tag.to_string(),
            })
        }
        _ => Ok(()),
    }
}
