// src/dag/algo.rs

//! Traversals over [`WorkflowGraph`]: topological order, shortest paths and
//! reachability. All of them walk the adjacency lists directly.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::dag::graph::WorkflowGraph;
use crate::errors::{CacheboundError, Result};
use crate::types::ActionId;

impl WorkflowGraph {
    /// Kahn's algorithm, always emitting the smallest ready id first so the
    /// order is a pure function of the graph.
    ///
    /// An empty graph yields an empty order. A cycle is reported as a
    /// `GraphConstruction` error; graphs built through [`WorkflowGraph::add_edge`]
    /// never contain one.
    pub fn topological_order(&self) -> Result<Vec<ActionId>> {
        let mut in_degree: BTreeMap<ActionId, usize> = self
            .nodes()
            .map(|id| (id, self.parents_of(id).len()))
            .collect();

        let mut ready: BTreeSet<ActionId> = in_degree
            .iter()
            .filter(|(_, deg)| **deg == 0)
            .map(|(id, _)| *id)
            .collect();

        let mut order = Vec::with_capacity(self.len());
        while let Some(id) = ready.pop_first() {
            order.push(id);
            for child in self.children_of(id) {
                if let Some(deg) = in_degree.get_mut(child) {
                    *deg -= 1;
                    if *deg == 0 {
                        ready.insert(*child);
                    }
                }
            }
        }

        if order.len() != self.len() {
            return Err(CacheboundError::GraphConstruction(format!(
                "graph has a cycle ({} of {} actions ordered)",
                order.len(),
                self.len()
            )));
        }
        Ok(order)
    }

    /// Whether the graph admits a topological order.
    pub fn is_acyclic(&self) -> bool {
        self.topological_order().is_ok()
    }

    /// Fewest-edges directed path `from -> ... -> to`, endpoints included.
    ///
    /// `from == to` yields the single-node path; `None` if `to` is not
    /// reachable or either endpoint is missing.
    pub fn shortest_path(&self, from: ActionId, to: ActionId) -> Option<Vec<ActionId>> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }
        if from == to {
            return Some(vec![from]);
        }

        let mut predecessor: BTreeMap<ActionId, ActionId> = BTreeMap::new();
        let mut queue = VecDeque::from([from]);

        while let Some(id) = queue.pop_front() {
            for &child in self.children_of(id) {
                if child == from || predecessor.contains_key(&child) {
                    continue;
                }
                predecessor.insert(child, id);
                if child == to {
                    let mut path = vec![to];
                    let mut cursor = to;
                    while let Some(&prev) = predecessor.get(&cursor) {
                        path.push(prev);
                        cursor = prev;
                    }
                    path.reverse();
                    return Some(path);
                }
                queue.push_back(child);
            }
        }
        None
    }

    /// Every action from which `id` is reachable, excluding `id` itself.
    pub fn ancestors(&self, id: ActionId) -> BTreeSet<ActionId> {
        let mut seen = BTreeSet::new();
        let mut stack: Vec<ActionId> = self.parents_of(id).to_vec();
        while let Some(next) = stack.pop() {
            if seen.insert(next) {
                stack.extend_from_slice(self.parents_of(next));
            }
        }
        seen
    }

    /// Whether a directed path leads from `from` to `to` (trivially true when
    /// they are the same action).
    pub fn reaches(&self, from: ActionId, to: ActionId) -> bool {
        if from == to {
            return true;
        }
        let mut seen = BTreeSet::new();
        let mut stack = vec![from];
        while let Some(next) = stack.pop() {
            for &child in self.children_of(next) {
                if child == to {
                    return true;
                }
                if seen.insert(child) {
                    stack.push(child);
                }
            }
        }
        false
    }
}
