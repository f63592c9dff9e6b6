use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Per-character overlay on a shared [`SkillTreeTemplate`](super::SkillTreeTemplate)
///
/// Only learned nodes appear in `levels`. `unlocked` is a cache derived from
/// `levels` and is rebuilt in full by the tree after every change.
///
/// Serializes as its levels only. There is no `Deserialize`: an overlay is
/// rebuilt through [`SkillTreeTemplate::restore_progress`](super::SkillTreeTemplate::restore_progress)
/// so the unlock cache is never left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillProgress {
    levels: BTreeMap<String, u32>,
    #[serde(skip)]
    unlocked: BTreeSet<String>,
}

impl SkillProgress {
    /// Current level of a node (0 if never learned)
    pub fn level(&self, node_id: &str) -> u32 {
        self.levels.get(node_id).copied().unwrap_or(0)
    }

    pub fn is_learned(&self, node_id: &str) -> bool {
        self.level(node_id) > 0
    }

    pub fn is_unlocked(&self, node_id: &str) -> bool {
        self.unlocked.contains(node_id)
    }

    /// Learned nodes and their levels
    pub fn levels(&self) -> &BTreeMap<String, u32> {
        &self.levels
    }

    /// Sum of levels over all learned nodes
    pub fn total_levels(&self) -> u32 {
        self.levels.values().sum()
    }

    pub(crate) fn set_level(&mut self, node_id: &str, level: u32) {
        if level == 0 {
            self.levels.remove(node_id);
        } else {
            self.levels.insert(node_id.to_string(), level);
        }
    }

    pub(crate) fn clear_levels(&mut self) {
        self.levels.clear();
    }

    pub(crate) fn set_unlocked(&mut self, unlocked: BTreeSet<String>) {
        self.unlocked = unlocked;
    }
}
