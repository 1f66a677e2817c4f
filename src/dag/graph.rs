// src/dag/graph.rs

use std::collections::{BTreeMap, BTreeSet};

use crate::errors::{CacheboundError, Result};
use crate::types::ActionId;

/// Internal node structure: stores immediate parents and children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct NodeLinks {
    /// Actions whose output this action consumes.
    parents: Vec<ActionId>,
    /// Actions that consume this action's output.
    children: Vec<ActionId>,
}

/// Directed acyclic graph of actions keyed by [`ActionId`].
///
/// Edges point parent -> child: the child's computation needs the parent's
/// output as input. Every mutation validates before touching the adjacency
/// lists, so a rejected edge leaves the graph exactly as it was.
///
/// Nodes live in a `BTreeMap` so iteration order (and everything derived from
/// it, like the topological order) is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowGraph {
    nodes: BTreeMap<ActionId, NodeLinks>,
}

impl WorkflowGraph {
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
        }
    }

    /// Number of actions in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.children.len()).sum()
    }

    pub fn contains(&self, id: ActionId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Insert an isolated action. Returns `false` if it was already present.
    pub fn add_node(&mut self, id: ActionId) -> bool {
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.nodes.insert(id, NodeLinks::default());
        true
    }

    /// Insert the edge `parent -> child`, adding missing endpoints.
    ///
    /// Returns `Ok(false)` if the edge already existed. Rejects self-loops and
    /// any edge that would close a cycle; in both cases the graph is left
    /// untouched.
    pub fn add_edge(&mut self, parent: ActionId, child: ActionId) -> Result<bool> {
        if parent == child {
            return Err(CacheboundError::GraphConstruction(format!(
                "self-loop on action {parent}"
            )));
        }
        if self.has_edge(parent, child) {
            return Ok(false);
        }
        if self.contains(parent) && self.contains(child) && self.reaches(child, parent) {
            return Err(CacheboundError::GraphConstruction(format!(
                "edge {parent} -> {child} would create a cycle"
            )));
        }

        self.add_node(parent);
        self.add_node(child);
        if let Some(links) = self.nodes.get_mut(&parent) {
            links.children.push(child);
        }
        if let Some(links) = self.nodes.get_mut(&child) {
            links.parents.push(parent);
        }
        Ok(true)
    }

    pub fn has_edge(&self, parent: ActionId, child: ActionId) -> bool {
        self.nodes
            .get(&parent)
            .is_some_and(|n| n.children.contains(&child))
    }

    /// All action ids, ascending.
    pub fn nodes(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.nodes.keys().copied()
    }

    /// All edges as `(parent, child)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (ActionId, ActionId)> + '_ {
        self.nodes
            .iter()
            .flat_map(|(id, n)| n.children.iter().map(move |c| (*id, *c)))
    }

    /// Immediate parents of an action (empty for unknown actions).
    pub fn parents_of(&self, id: ActionId) -> &[ActionId] {
        self.nodes
            .get(&id)
            .map(|n| n.parents.as_slice())
            .unwrap_or(&[])
    }

    /// Immediate children of an action (empty for unknown actions).
    pub fn children_of(&self, id: ActionId) -> &[ActionId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Actions with no children: the workflow's final deliverables.
    pub fn sinks(&self) -> Vec<ActionId> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.children.is_empty())
            .map(|(id, _)| *id)
            .collect()
    }

    /// Actions with no parents.
    pub fn sources(&self) -> Vec<ActionId> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.parents.is_empty())
            .map(|(id, _)| *id)
            .collect()
    }

    /// The subgraph induced by `ids`: those actions plus every edge of `self`
    /// running between two of them. Ids not present in `self` are ignored.
    pub fn induced_subgraph(&self, ids: &[ActionId]) -> WorkflowGraph {
        let keep: BTreeSet<ActionId> = ids
            .iter()
            .copied()
            .filter(|id| self.contains(*id))
            .collect();

        let mut nodes = BTreeMap::new();
        for id in &keep {
            let links = &self.nodes[id];
            nodes.insert(
                *id,
                NodeLinks {
                    parents: links
                        .parents
                        .iter()
                        .copied()
                        .filter(|p| keep.contains(p))
                        .collect(),
                    children: links
                        .children
                        .iter()
                        .copied()
                        .filter(|c| keep.contains(c))
                        .collect(),
                },
            );
        }
        WorkflowGraph { nodes }
    }

    /// Graph union: add every action and edge of `other` to `self`.
    ///
    /// The union is assembled on a copy and only swapped in once every edge
    /// has been accepted, so a failing merge leaves `self` unchanged.
    pub fn merge(&mut self, other: &WorkflowGraph) -> Result<()> {
        let mut merged = self.clone();
        for id in other.nodes() {
            merged.add_node(id);
        }
        for (parent, child) in other.edges() {
            merged.add_edge(parent, child)?;
        }
        *self = merged;
        Ok(())
    }
}
