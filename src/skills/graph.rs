//! The static prerequisite graph over all purchasable skills.
//!
//! Edges run from a prerequisite to the skill that needs it. A graph is only
//! handed out once it is known to be acyclic, every prerequisite exists, and
//! no skill depends on a skill of a higher tier.

use super::catalog::standard_skills;
use super::types::{Skill, SkillLevels, SkillTree};
use crate::error::SkillGraphError;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

/// Validated skill definitions plus lookup indices.
#[derive(Debug, Clone)]
pub struct SkillGraph {
    skills: Vec<Skill>,
    index: HashMap<&'static str, usize>,
    graph: DiGraph<usize, ()>,
}

impl SkillGraph {
    /// Build and validate a graph from skill definitions.
    pub fn new(skills: Vec<Skill>) -> Result<Self, SkillGraphError> {
        let mut index = HashMap::with_capacity(skills.len());
        for (i, skill) in skills.iter().enumerate() {
            if index.insert(skill.id, i).is_some() {
                return Err(SkillGraphError::DuplicateSkill(skill.id.to_string()));
            }
            if skill.max_level == 0 {
                return Err(SkillGraphError::ZeroMaxLevel(skill.id.to_string()));
            }
        }

        let mut graph = DiGraph::with_capacity(skills.len(), skills.len());
        let nodes: Vec<NodeIndex> = (0..skills.len()).map(|i| graph.add_node(i)).collect();

        for (i, skill) in skills.iter().enumerate() {
            for prerequisite in skill.prerequisites {
                let Some(&p) = index.get(prerequisite) else {
                    return Err(SkillGraphError::UnknownPrerequisite {
                        skill: skill.id.to_string(),
                        prerequisite: prerequisite.to_string(),
                    });
                };
                let required = &skills[p];
                if required.tier > skill.tier {
                    return Err(SkillGraphError::PrerequisiteTierTooHigh {
                        skill: skill.id.to_string(),
                        tier: skill.tier,
                        prerequisite: required.id.to_string(),
                        prerequisite_tier: required.tier,
                    });
                }
                graph.add_edge(nodes[p], nodes[i], ());
            }
        }

        let built = Self {
            skills,
            index,
            graph,
        };
        built.detect_cycles()?;
        Ok(built)
    }

    /// The built-in skill catalog, validated.
    pub fn try_standard() -> Result<Self, SkillGraphError> {
        Self::new(standard_skills())
    }

    /// The built-in skill catalog for callers that do not handle a broken
    /// catalog. An invalid catalog logs an error and yields an empty graph;
    /// hosts that need to know call [`SkillGraph::try_standard`] at startup.
    pub fn standard() -> Self {
        Self::try_standard().unwrap_or_else(|e| {
            log::error!("Built-in skill catalog is invalid: {}", e);
            Self {
                skills: Vec::new(),
                index: HashMap::new(),
                graph: DiGraph::new(),
            }
        })
    }

    fn detect_cycles(&self) -> Result<(), SkillGraphError> {
        let mut visited = HashSet::new();
        let mut on_stack = HashSet::new();
        let mut path = Vec::new();
        for node in self.graph.node_indices() {
            if !visited.contains(&node) {
                self.dfs_cycle(node, &mut visited, &mut on_stack, &mut path)?;
            }
        }
        Ok(())
    }

    fn dfs_cycle(
        &self,
        node: NodeIndex,
        visited: &mut HashSet<NodeIndex>,
        on_stack: &mut HashSet<NodeIndex>,
        path: &mut Vec<NodeIndex>,
    ) -> Result<(), SkillGraphError> {
        visited.insert(node);
        on_stack.insert(node);
        path.push(node);

        for next in self.graph.neighbors(node) {
            if on_stack.contains(&next) {
                let start = path.iter().position(|n| *n == next).unwrap_or(0);
                let mut cycle: Vec<String> = path[start..]
                    .iter()
                    .map(|n| self.skills[self.graph[*n]].id.to_string())
                    .collect();
                cycle.push(self.skills[self.graph[next]].id.to_string());
                return Err(SkillGraphError::Cycle { path: cycle });
            }
            if !visited.contains(&next) {
                self.dfs_cycle(next, visited, on_stack, path)?;
            }
        }

        on_stack.remove(&node);
        path.pop();
        Ok(())
    }

    pub fn get(&self, skill_id: &str) -> Option<&Skill> {
        self.index.get(skill_id).map(|&i| &self.skills[i])
    }

    /// All skills in definition order.
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn in_tree(&self, tree: SkillTree) -> impl Iterator<Item = &Skill> {
        self.skills.iter().filter(move |s| s.tree == tree)
    }

    /// Skills that list `skill_id` as a direct prerequisite.
    pub fn children(&self, skill_id: &str) -> Vec<&Skill> {
        match self.index.get(skill_id) {
            Some(&i) => self
                .graph
                .neighbors(NodeIndex::new(i))
                .map(|n| &self.skills[self.graph[n]])
                .collect(),
            None => Vec::new(),
        }
    }

    /// Prerequisites come before the skills that need them.
    pub fn topological_order(&self) -> Vec<&Skill> {
        match toposort(&self.graph, None) {
            Ok(order) => order.into_iter().map(|n| &self.skills[self.graph[n]]).collect(),
            // Unreachable for a graph built through `new`.
            Err(_) => self.skills.iter().collect(),
        }
    }

    /// Whether every direct prerequisite is at level 1 or higher.
    pub fn is_unlocked(&self, skill_id: &str, levels: &SkillLevels) -> bool {
        self.get(skill_id)
            .map(|skill| skill.prerequisites.iter().all(|p| levels.level(p) >= 1))
            .unwrap_or(false)
    }

    /// Skill points already sunk into the given levels.
    pub fn points_spent(&self, levels: &SkillLevels) -> u64 {
        levels
            .iter()
            .filter_map(|(id, level)| self.get(id).map(|s| s.total_cost_to(level)))
            .sum()
    }
}

impl Default for SkillGraph {
    fn default() -> Self {
        Self::standard()
    }
}
