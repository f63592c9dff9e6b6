//! SkillTreeRegistry - one immutable tree template per class, loaded from TOML

use super::node::SkillNodeTemplate;
use super::tree::SkillTreeTemplate;
use crate::config::{self, ConfigError};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

const BUILTIN_TREES: &[&str] = &[
    include_str!("../../content/trees/warrior.toml"),
    include_str!("../../content/trees/archer.toml"),
    include_str!("../../content/trees/mage.toml"),
];

/// TOML layout of a skill tree file
#[derive(Debug, Deserialize)]
struct TreeFileConfig {
    tree: TreeHeader,
    #[serde(default)]
    nodes: Vec<SkillNodeTemplate>,
}

#[derive(Debug, Deserialize)]
struct TreeHeader {
    class: String,
    name: String,
}

/// Registry of skill tree templates keyed by class id
#[derive(Debug, Clone, Default)]
pub struct SkillTreeRegistry {
    trees: HashMap<String, SkillTreeTemplate>,
}

impl SkillTreeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Trees for the built-in classes
    pub fn builtin() -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for content in BUILTIN_TREES {
            registry.insert(Self::parse_tree(content)?)?;
        }
        Ok(registry)
    }

    /// Load every tree file under `dir` (recursively)
    pub fn load_dir(dir: &Path) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        for path in config::toml_files(dir)? {
            let content = config::read_file(&path)?;
            let tree = Self::parse_tree(&content).map_err(|e| e.at_path(&path))?;
            registry.insert(tree).map_err(|e| e.at_path(&path))?;
        }
        info!(trees = registry.trees.len(), dir = %dir.display(), "loaded skill trees");
        Ok(registry)
    }

    /// Parse and validate a single tree file
    pub fn parse_tree(content: &str) -> Result<SkillTreeTemplate, ConfigError> {
        let file: TreeFileConfig = config::parse_toml(content)?;
        let class = file.tree.class;
        SkillTreeTemplate::new(class.clone(), file.tree.name, file.nodes)
            .map_err(|error| ConfigError::Tree { tree: class, error })
    }

    /// Add a tree; a class may have only one
    pub fn insert(&mut self, tree: SkillTreeTemplate) -> Result<(), ConfigError> {
        if self.trees.contains_key(tree.class_id()) {
            return Err(ConfigError::validation(format!(
                "duplicate skill tree for class '{}'",
                tree.class_id()
            )));
        }
        self.trees.insert(tree.class_id().to_string(), tree);
        Ok(())
    }

    /// Get the tree for a class
    pub fn get(&self, class_id: &str) -> Option<&SkillTreeTemplate> {
        self.trees.get(class_id)
    }

    pub fn contains(&self, class_id: &str) -> bool {
        self.trees.contains_key(class_id)
    }

    /// List all class ids with a tree
    pub fn class_ids(&self) -> impl Iterator<Item = &str> {
        self.trees.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}
