#![allow(dead_code)]

use std::collections::BTreeSet;

use petgraph::graphmap::DiGraphMap;

use cachebound::config::{GenerationParams, GeneratorConfig, RawConfigFile};
use cachebound::dag::WorkflowGraph;
use cachebound::types::ActionId;

/// Validated generation parameters from a raw config.
pub fn generation_params(raw: &RawConfigFile) -> GenerationParams {
    GeneratorConfig::try_from(raw)
        .expect("test config must validate")
        .params
}

/// Independent cycle check through petgraph.
pub fn petgraph_is_cyclic(graph: &WorkflowGraph) -> bool {
    let mut g: DiGraphMap<ActionId, ()> = DiGraphMap::new();
    for id in graph.nodes() {
        g.add_node(id);
    }
    for (parent, child) in graph.edges() {
        g.add_edge(parent, child, ());
    }
    petgraph::algo::is_cyclic_directed(&g)
}

pub fn edge_set(graph: &WorkflowGraph) -> BTreeSet<(ActionId, ActionId)> {
    graph.edges().collect()
}
