//! SkillTreeTemplate - per-class prerequisite graph
//!
//! A template is immutable and shared by every character of its class. All
//! per-character state lives in a [`SkillProgress`] overlay passed into each
//! call, so two characters of one class never see each other's levels.
//!
//! Unlock status is recomputed for every node after each learn or reset.

use super::effect::{EffectBundle, EffectValue};
use super::node::{ActiveSkill, NodeView, SkillNodeTemplate};
use super::progress::SkillProgress;
use super::{LearnError, TreeError};
use crate::character::CharacterRecord;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use tracing::debug;

/// Grid position of a node for tree rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeLayout {
    pub id: String,
    /// Length of the longest prerequisite chain leading to this node
    pub depth: u32,
    /// Position among nodes of the same depth, in declaration order
    pub row: u32,
}

/// Prerequisite edge, pointing from the prerequisite to the dependent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutEdge {
    pub from: String,
    pub to: String,
}

/// Everything a UI needs to draw the tree
#[derive(Debug, Clone, Default, Serialize)]
pub struct LayoutInfo {
    pub nodes: Vec<NodeLayout>,
    pub edges: Vec<LayoutEdge>,
    /// Number of distinct depth columns
    pub columns: u32,
}

/// Immutable skill tree for one class
#[derive(Debug, Clone)]
pub struct SkillTreeTemplate {
    class_id: String,
    name: String,
    /// Declaration order
    nodes: Vec<SkillNodeTemplate>,
    index: HashMap<String, usize>,
    layout: LayoutInfo,
}

impl SkillTreeTemplate {
    /// Validate the node set and build the template
    ///
    /// Rejects duplicate ids, zero max levels, empty per-level lists, unknown
    /// prerequisites and prerequisite cycles.
    pub fn new(
        class_id: impl Into<String>,
        name: impl Into<String>,
        nodes: Vec<SkillNodeTemplate>,
    ) -> Result<Self, TreeError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if node.max_level == 0 {
                return Err(TreeError::ZeroMaxLevel(node.id.clone()));
            }
            for effect in &node.effects {
                if matches!(&effect.value, EffectValue::PerLevel(tiers) if tiers.is_empty()) {
                    return Err(TreeError::EmptyEffectTiers {
                        node: node.id.clone(),
                        kind: effect.kind,
                    });
                }
            }
            if index.insert(node.id.clone(), i).is_some() {
                return Err(TreeError::DuplicateNode(node.id.clone()));
            }
        }

        let layout = build_layout(&nodes, &index)?;

        Ok(SkillTreeTemplate {
            class_id: class_id.into(),
            name: name.into(),
            nodes,
            index,
            layout,
        })
    }

    pub fn class_id(&self) -> &str {
        &self.class_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node(&self, id: &str) -> Option<&SkillNodeTemplate> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All node templates in declaration order
    pub fn nodes(&self) -> &[SkillNodeTemplate] {
        &self.nodes
    }

    pub fn get_layout_info(&self) -> &LayoutInfo {
        &self.layout
    }

    /// Fresh overlay for a new character
    pub fn new_progress(&self) -> SkillProgress {
        let mut progress = SkillProgress::default();
        self.refresh_unlocks(&mut progress);
        progress
    }

    /// Rebuild an overlay from persisted node levels
    ///
    /// Levels above a node's max are clamped; unknown node ids are rejected.
    pub fn restore_progress(&self, levels: &BTreeMap<String, u32>) -> Result<SkillProgress, TreeError> {
        let mut progress = SkillProgress::default();
        for (id, level) in levels {
            let node = self
                .node(id)
                .ok_or_else(|| TreeError::UnknownNode(id.clone()))?;
            progress.set_level(&node.id, (*level).min(node.max_level));
        }
        self.refresh_unlocks(&mut progress);
        Ok(progress)
    }

    /// Recompute every node's unlock status from its prerequisites
    pub fn refresh_unlocks(&self, progress: &mut SkillProgress) {
        let unlocked: BTreeSet<String> = self
            .nodes
            .iter()
            .filter(|n| n.prerequisites.iter().all(|p| progress.is_learned(p)))
            .map(|n| n.id.clone())
            .collect();
        progress.set_unlocked(unlocked);
    }

    /// Check whether `node_id` can gain a level, returning the reason if not
    pub fn check_learn(
        &self,
        progress: &SkillProgress,
        character: &impl CharacterRecord,
        node_id: &str,
    ) -> Result<&SkillNodeTemplate, LearnError> {
        let node = self
            .node(node_id)
            .ok_or_else(|| LearnError::UnknownNode(node_id.to_string()))?;

        let level = progress.level(node_id);
        if level >= node.max_level {
            return Err(LearnError::MaxLevel {
                node: node.id.clone(),
                max_level: node.max_level,
            });
        }
        if character.level() < node.required_level {
            return Err(LearnError::LevelTooLow {
                required: node.required_level,
                actual: character.level(),
            });
        }
        if character.skill_points() < node.points_per_level {
            return Err(LearnError::InsufficientPoints {
                required: node.points_per_level,
                available: character.skill_points(),
            });
        }
        if let Some(missing) = node.prerequisites.iter().find(|p| !progress.is_learned(p)) {
            return Err(LearnError::MissingPrerequisite {
                node: node.id.clone(),
                prerequisite: missing.clone(),
            });
        }
        Ok(node)
    }

    pub fn can_learn(
        &self,
        progress: &SkillProgress,
        character: &impl CharacterRecord,
        node_id: &str,
    ) -> bool {
        self.check_learn(progress, character, node_id).is_ok()
    }

    /// Learn one level of `node_id`, spending the character's skill points
    ///
    /// Returns the node's new level.
    pub fn learn(
        &self,
        progress: &mut SkillProgress,
        character: &mut impl CharacterRecord,
        node_id: &str,
    ) -> Result<u32, LearnError> {
        let node = self.check_learn(&*progress, &*character, node_id)?;
        let new_level = progress.level(node_id) + 1;
        let cost = node.points_per_level;

        progress.set_level(&node.id, new_level);
        character.set_skill_points(character.skill_points() - cost);
        self.refresh_unlocks(progress);

        debug!(tree = %self.class_id, node = node_id, level = new_level, cost, "learned skill");
        Ok(new_level)
    }

    /// Unlearn every node and refund the points spent on them
    ///
    /// Returns the number of points refunded.
    pub fn reset_all_skills(
        &self,
        progress: &mut SkillProgress,
        character: &mut impl CharacterRecord,
    ) -> u32 {
        let refund = self.points_spent(progress);
        progress.clear_levels();
        character.set_skill_points(character.skill_points().saturating_add(refund));
        self.refresh_unlocks(progress);

        debug!(tree = %self.class_id, refund, "reset skill tree");
        refund
    }

    /// Skill points currently invested in this tree
    pub fn points_spent(&self, progress: &SkillProgress) -> u32 {
        progress
            .levels()
            .iter()
            .filter_map(|(id, level)| self.node(id).map(|n| n.points_per_level * level))
            .sum()
    }

    /// Sum of all learned passive nodes' effects
    pub fn get_passive_effects(&self, progress: &SkillProgress) -> EffectBundle {
        let mut total = EffectBundle::new();
        for node in self.nodes.iter().filter(|n| n.is_passive()) {
            let level = progress.level(&node.id);
            if level > 0 {
                total.merge(&node.effects_at(level));
            }
        }
        total
    }

    /// Learned active nodes with effects resolved at their current level
    pub fn get_active_skills(&self, progress: &SkillProgress) -> Vec<ActiveSkill> {
        self.nodes
            .iter()
            .filter(|n| !n.is_passive())
            .filter_map(|n| {
                let level = progress.level(&n.id);
                (level > 0).then(|| ActiveSkill {
                    id: n.id.clone(),
                    name: n.name.clone(),
                    level,
                    effects: n.effects_at(level),
                })
            })
            .collect()
    }

    /// Every node with this character's state attached
    pub fn get_all_nodes(
        &self,
        progress: &SkillProgress,
        character: &impl CharacterRecord,
    ) -> Vec<NodeView> {
        self.nodes
            .iter()
            .map(|n| {
                let level = progress.level(&n.id);
                NodeView {
                    id: n.id.clone(),
                    name: n.name.clone(),
                    description: n.description.clone(),
                    kind: n.kind,
                    level,
                    max_level: n.max_level,
                    required_level: n.required_level,
                    points_per_level: n.points_per_level,
                    prerequisites: n.prerequisites.clone(),
                    is_learned: level > 0,
                    is_unlocked: progress.is_unlocked(&n.id),
                    can_learn: self.can_learn(progress, character, &n.id),
                    current_effects: n.effects_at(level),
                    next_effects: (level < n.max_level).then(|| n.effects_at(level + 1)),
                }
            })
            .collect()
    }
}

/// Topologically sort the prerequisite graph (Kahn) and assign grid positions
fn build_layout(
    nodes: &[SkillNodeTemplate],
    index: &HashMap<String, usize>,
) -> Result<LayoutInfo, TreeError> {
    let n = nodes.len();
    let mut in_degree = vec![0usize; n];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut edges = Vec::new();

    for (i, node) in nodes.iter().enumerate() {
        for prereq in &node.prerequisites {
            let &p = index
                .get(prereq)
                .ok_or_else(|| TreeError::UnknownPrerequisite {
                    node: node.id.clone(),
                    prerequisite: prereq.clone(),
                })?;
            if p == i {
                return Err(TreeError::Cycle(node.id.clone()));
            }
            in_degree[i] += 1;
            dependents[p].push(i);
            edges.push(LayoutEdge {
                from: prereq.clone(),
                to: node.id.clone(),
            });
        }
    }

    let mut queue: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    let mut depth = vec![0u32; n];
    let mut visited = 0;
    while let Some(i) = queue.pop_front() {
        visited += 1;
        for &d in &dependents[i] {
            depth[d] = depth[d].max(depth[i] + 1);
            in_degree[d] -= 1;
            if in_degree[d] == 0 {
                queue.push_back(d);
            }
        }
    }

    if visited != n {
        // Any node still holding in-degree sits on or behind a cycle
        let stuck = (0..n).find(|&i| in_degree[i] > 0).unwrap_or(0);
        return Err(TreeError::Cycle(nodes[stuck].id.clone()));
    }

    let mut rows_used: HashMap<u32, u32> = HashMap::new();
    let layout_nodes = nodes
        .iter()
        .zip(&depth)
        .map(|(node, &d)| {
            let row = rows_used.entry(d).or_insert(0);
            let layout = NodeLayout {
                id: node.id.clone(),
                depth: d,
                row: *row,
            };
            *row += 1;
            layout
        })
        .collect();

    Ok(LayoutInfo {
        nodes: layout_nodes,
        edges,
        columns: rows_used.len() as u32,
    })
}
