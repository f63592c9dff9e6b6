//! ClassCatalog - the immutable set of class templates

use super::definition::ClassDefinition;
use crate::config::{self, ConfigError};
use crate::skill::SkillTreeRegistry;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::info;

const BUILTIN_CLASSES: &str = include_str!("../../content/classes.toml");

/// TOML layout of a class file
#[derive(Debug, Deserialize)]
struct ClassFileConfig {
    #[serde(default)]
    classes: Vec<ClassDefinition>,
}

/// Class templates in declaration order, indexed by id
#[derive(Debug, Clone, Default)]
pub struct ClassCatalog {
    classes: Vec<ClassDefinition>,
    index: HashMap<String, usize>,
}

impl ClassCatalog {
    /// Validate and index a set of class definitions
    pub fn from_classes(classes: Vec<ClassDefinition>) -> Result<Self, ConfigError> {
        let mut index = HashMap::with_capacity(classes.len());
        for (i, class) in classes.iter().enumerate() {
            validate_class(class)?;
            if index.insert(class.id.clone(), i).is_some() {
                return Err(ConfigError::validation(format!("duplicate class id '{}'", class.id)));
            }
        }
        Ok(ClassCatalog { classes, index })
    }

    /// The warrior, archer and mage classes
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::parse(BUILTIN_CLASSES)
    }

    /// Parse a class file from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: ClassFileConfig = config::parse_toml(content)?;
        Self::from_classes(file.classes)
    }

    /// Load a class file from disk
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file: ClassFileConfig = config::load_toml(path)?;
        let catalog = Self::from_classes(file.classes).map_err(|e| e.at_path(path))?;
        info!(classes = catalog.len(), path = %path.display(), "loaded class catalog");
        Ok(catalog)
    }

    /// Check every skill id a class refers to against its tree
    pub fn validate_skills(&self, trees: &SkillTreeRegistry) -> Result<(), ConfigError> {
        for class in &self.classes {
            let tree = trees.get(&class.id).ok_or_else(|| {
                ConfigError::validation(format!("class '{}' has no skill tree", class.id))
            })?;
            let referenced = class
                .starting_skills
                .iter()
                .chain(class.specializations.iter().flat_map(|s| s.unlocked_skills.iter()));
            for skill in referenced {
                if !tree.contains(skill) {
                    return Err(ConfigError::validation(format!(
                        "class '{}' refers to unknown skill '{}'",
                        class.id, skill
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ClassDefinition> {
        self.index.get(id).map(|&i| &self.classes[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All classes in declaration order
    pub fn get_all_classes(&self) -> &[ClassDefinition] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

fn validate_class(class: &ClassDefinition) -> Result<(), ConfigError> {
    let fail = |what: &str| -> Result<(), ConfigError> {
        Err(ConfigError::validation(format!("class '{}': {}", class.id, what)))
    };

    if class.base_stats.values().iter().any(|v| !v.is_finite() || *v < 0.0) {
        return fail("base stats must be non-negative");
    }
    if class.growth.values().iter().any(|v| !v.is_finite() || *v < 0.0) {
        return fail("growth must be non-negative");
    }

    let mut seen = HashSet::new();
    for spec in &class.specializations {
        if !seen.insert(spec.id.as_str()) {
            return fail(&format!("duplicate specialization '{}'", spec.id));
        }
        if spec.bonuses.multipliers().iter().any(|m| !m.is_finite() || *m <= 0.0) {
            return fail(&format!("specialization '{}' has a non-positive multiplier", spec.id));
        }
    }
    Ok(())
}
