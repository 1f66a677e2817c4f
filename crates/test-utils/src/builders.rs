#![allow(dead_code)]

use std::path::PathBuf;

use cachebound::catalog::ActionCatalog;
use cachebound::config::{NormalParams, RawConfigFile};
use cachebound::dag::WorkflowGraph;
use cachebound::history::WorkflowHistory;
use cachebound::types::{Action, ActionId, CandidatePolicy};

/// Builder for `WorkflowGraph` to simplify test setup.
pub struct GraphBuilder {
    graph: WorkflowGraph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: WorkflowGraph::new(),
        }
    }

    pub fn node(mut self, id: ActionId) -> Self {
        self.graph.add_node(id);
        self
    }

    /// Add `parent -> child`.
    pub fn edge(mut self, parent: ActionId, child: ActionId) -> Self {
        self.graph
            .add_edge(parent, child)
            .expect("test graph edge must keep the graph acyclic");
        self
    }

    /// Add `ids[0] -> ids[1] -> ...`.
    pub fn chain(mut self, ids: &[ActionId]) -> Self {
        for pair in ids.windows(2) {
            self = self.edge(pair[0], pair[1]);
        }
        if let [single] = ids {
            self = self.node(*single);
        }
        self
    }

    pub fn build(self) -> WorkflowGraph {
        self.graph
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `ActionCatalog`.
pub struct CatalogBuilder {
    actions: Vec<Action>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self { actions: vec![] }
    }

    /// Add an action with the given size and recomputation cost.
    pub fn action(mut self, id: ActionId, size_mb: f64, cost: f64) -> Self {
        self.actions
            .push(Action::new(id, size_mb, cost, format!("ACT{id:07}")));
        self
    }

    /// Add actions `0..n`, all with the same size and cost.
    pub fn uniform(mut self, n: usize, size_mb: f64, cost: f64) -> Self {
        for id in 0..n {
            self = self.action(id, size_mb, cost);
        }
        self
    }

    pub fn build(self) -> ActionCatalog {
        ActionCatalog::from_actions(self.actions).expect("test catalog ids must not conflict")
    }
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// History from a list of graphs.
pub fn history(workflows: Vec<WorkflowGraph>) -> WorkflowHistory {
    workflows.into_iter().collect()
}

/// Builder for `RawConfigFile` with every generator and evaluator field set
/// to small, sensible values.
pub struct RawConfigBuilder {
    config: RawConfigFile,
}

impl RawConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                history_folder: Some(PathBuf::from("history")),
                output_folder_path: Some(PathBuf::from("history")),
                size_limit: Some(100),
                nb_actions: Some(60),
                action_size: Some(NormalParams::new(20.0, 8.0)),
                action_time: Some(NormalParams::new(30.0, 10.0)),
                workflow_size: Some(NormalParams::new(10.0, 3.0)),
                previous_actions: Some(NormalParams::new(0.4, 0.2)),
                nb_children: Some(NormalParams::new(2.0, 1.0)),
                nb_parent: Some(NormalParams::new(2.0, 1.0)),
                seed: Some(7),
                candidate_policy: None,
                name: Some("synthetic".to_string()),
                version: Some("1.0".to_string()),
                main_class_name: Some("org.example.Main".to_string()),
                action_folder: Some("/actions".to_string()),
                name_node: Some("hdfs://namenode:8020".to_string()),
            },
        }
    }

    pub fn nb_actions(mut self, n: usize) -> Self {
        self.config.nb_actions = Some(n);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn size_limit(mut self, limit: i64) -> Self {
        self.config.size_limit = Some(limit);
        self
    }

    pub fn folder(mut self, folder: impl Into<PathBuf>) -> Self {
        let folder = folder.into();
        self.config.history_folder = Some(folder.clone());
        self.config.output_folder_path = Some(folder);
        self
    }

    pub fn workflow_size(mut self, mean: f64, std: f64) -> Self {
        self.config.workflow_size = Some(NormalParams::new(mean, std));
        self
    }

    pub fn previous_actions(mut self, mean: f64, std: f64) -> Self {
        self.config.previous_actions = Some(NormalParams::new(mean, std));
        self
    }

    pub fn candidate_policy(mut self, policy: CandidatePolicy) -> Self {
        self.config.candidate_policy = Some(policy);
        self
    }

    pub fn build(self) -> RawConfigFile {
        self.config
    }
}

impl Default for RawConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
