// src/io/workflow_file.rs

//! The persisted workflow document: one JSON file per workflow.

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use serde::{Deserialize, Serialize};

use crate::catalog::ActionCatalog;
use crate::config::model::WorkflowMetadata;
use crate::dag::WorkflowGraph;
use crate::errors::{CacheboundError, Result};
use crate::types::{Action, ActionId};

pub const ACTION_TYPE: &str = "COMMAND_LINE";

pub const KEY_SIZE: &str = "sizeInMB";
pub const KEY_TIME: &str = "timeInSeconds";
pub const KEY_NAME_NODE: &str = "nameNode";
pub const KEY_UNIQUE: &str = "uniqueRandomInput";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDocument {
    pub name: String,
    pub version: String,
    pub start_action_id: ActionId,
    pub end_action_id: ActionId,
    pub actions: Vec<ActionRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    pub name: String,
    pub action_id: ActionId,
    #[serde(rename = "type")]
    pub action_type: String,
    pub main_class_name: String,
    pub action_folder: String,
    pub force_computation: bool,
    pub parent_actions: Vec<ActionId>,
    /// Always `sizeInMB`, `timeInSeconds`, `nameNode`, `uniqueRandomInput`,
    /// in that order.
    pub additional_input: Vec<KeyValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: &str, value: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            value: value.into(),
        }
    }
}

impl ActionRecord {
    fn input(&self, key: &str) -> Result<&str> {
        self.additional_input
            .iter()
            .find(|kv| kv.key == key)
            .map(|kv| kv.value.as_str())
            .ok_or_else(|| {
                CacheboundError::GraphConstruction(format!(
                    "action {} has no `{key}` in additionalInput",
                    self.action_id
                ))
            })
    }

    fn number(&self, key: &str) -> Result<f64> {
        let raw = self.input(key)?;
        raw.trim().parse::<f64>().map_err(|e| {
            CacheboundError::GraphConstruction(format!(
                "action {}: `{key}` is not a number ({raw:?}): {e}",
                self.action_id
            ))
        })
    }

    /// Static metadata of the action this record describes.
    pub fn to_action(&self) -> Result<Action> {
        Ok(Action::new(
            self.action_id,
            self.number(KEY_SIZE)?,
            self.number(KEY_TIME)?,
            self.input(KEY_UNIQUE)?,
        ))
    }
}

impl WorkflowDocument {
    /// Describe `workflow` as the `index`-th document of a history.
    ///
    /// Actions are listed in topological order; `startActionId` and
    /// `endActionId` are the first and last of that order. An empty workflow
    /// has nothing to persist and yields `None`.
    pub fn from_workflow(
        workflow: &WorkflowGraph,
        catalog: &ActionCatalog,
        metadata: &WorkflowMetadata,
        index: usize,
    ) -> Result<Option<Self>> {
        let order = workflow.topological_order()?;
        let (Some(&start), Some(&end)) = (order.first(), order.last()) else {
            return Ok(None);
        };

        let mut actions = Vec::with_capacity(order.len());
        for id in order {
            let action = catalog.action(id)?;
            actions.push(ActionRecord {
                name: format!("action_{id}"),
                action_id: id,
                action_type: ACTION_TYPE.to_string(),
                main_class_name: metadata.main_class_name.clone(),
                action_folder: metadata.action_folder.clone(),
                force_computation: false,
                parent_actions: workflow.parents_of(id).to_vec(),
                additional_input: vec![
                    KeyValue::new(KEY_SIZE, action.size_mb.to_string()),
                    KeyValue::new(KEY_TIME, action.recompute_cost.to_string()),
                    KeyValue::new(KEY_NAME_NODE, metadata.name_node.clone()),
                    KeyValue::new(KEY_UNIQUE, action.name.clone()),
                ],
            });
        }

        Ok(Some(Self {
            name: format!("{}_{index}", metadata.name),
            version: metadata.version.clone(),
            start_action_id: start,
            end_action_id: end,
            actions,
        }))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Validate the document and split it into action metadata and graph.
    pub fn into_parts(self) -> Result<(Vec<Action>, WorkflowGraph)> {
        validate_document(&self)?;

        let mut actions = Vec::with_capacity(self.actions.len());
        for record in &self.actions {
            actions.push(record.to_action()?);
        }
        let mut graph = WorkflowGraph::new();
        for record in &self.actions {
            graph.add_node(record.action_id);
        }
        for record in &self.actions {
            for &parent in &record.parent_actions {
                graph.add_edge(parent, record.action_id)?;
            }
        }
        Ok((actions, graph))
    }
}

/// Structural checks on a document before any graph is built:
/// - action ids are unique
/// - every parent is an action of the same document, and not the action itself
/// - the parent relation has no cycles
pub fn validate_document(doc: &WorkflowDocument) -> Result<()> {
    let mut graph: DiGraphMap<ActionId, ()> = DiGraphMap::new();

    for record in &doc.actions {
        if graph.contains_node(record.action_id) {
            return Err(CacheboundError::GraphConstruction(format!(
                "workflow '{}' lists action {} more than once",
                doc.name, record.action_id
            )));
        }
        graph.add_node(record.action_id);
    }

    for record in &doc.actions {
        for &parent in &record.parent_actions {
            if parent == record.action_id {
                return Err(CacheboundError::GraphConstruction(format!(
                    "workflow '{}': action {} lists itself as a parent",
                    doc.name, parent
                )));
            }
            if !graph.contains_node(parent) {
                return Err(CacheboundError::GraphConstruction(format!(
                    "workflow '{}': action {} has unknown parent {}",
                    doc.name, record.action_id, parent
                )));
            }
            // Edge direction: parent -> child.
            graph.add_edge(parent, record.action_id, ());
        }
    }

    // A topological sort will fail if there is a cycle.
    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(CacheboundError::GraphConstruction(format!(
            "workflow '{}': cycle detected involving action {}",
            doc.name,
            cycle.node_id()
        ))),
    }
}
