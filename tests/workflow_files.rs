// tests/workflow_files.rs

mod common;

use std::collections::BTreeSet;
use std::path::Path;

use tempfile::tempdir;

use cachebound::config::WorkflowMetadata;
use cachebound::errors::CacheboundError;
use cachebound::evaluator::SimulationOrchestrator;
use cachebound::fs::RealFileSystem;
use cachebound::fs::mock::MockFileSystem;
use cachebound::io::{
    WorkflowDocument, read_history, validate_document, workflow_file_name, write_history,
};
use cachebound::{run_evaluate, run_generate};
use cachebound_test_utils::builders::{CatalogBuilder, GraphBuilder, RawConfigBuilder, history};
use cachebound_test_utils::init_tracing;

use common::edge_set;

fn metadata() -> WorkflowMetadata {
    WorkflowMetadata {
        name: "synthetic".to_string(),
        version: "1.0".to_string(),
        main_class_name: "org.example.Main".to_string(),
        action_folder: "/actions".to_string(),
        name_node: "hdfs://namenode:8020".to_string(),
    }
}

fn fork_document() -> WorkflowDocument {
    // 0 -> 1, 0 -> 2
    let graph = GraphBuilder::new().edge(0, 1).edge(0, 2).build();
    let catalog = CatalogBuilder::new()
        .action(0, 12.5, 3.0)
        .action(1, 4.0, 1.5)
        .action(2, 8.0, 2.0)
        .build();
    WorkflowDocument::from_workflow(&graph, &catalog, &metadata(), 3)
        .unwrap()
        .unwrap()
}

#[test]
fn document_lists_actions_in_topological_order() {
    let doc = fork_document();

    assert_eq!(doc.name, "synthetic_3");
    assert_eq!(doc.version, "1.0");
    assert_eq!(doc.start_action_id, 0);
    assert_eq!(doc.end_action_id, 2);

    let ids: Vec<usize> = doc.actions.iter().map(|a| a.action_id).collect();
    assert_eq!(ids, vec![0, 1, 2]);

    let first = &doc.actions[0];
    assert_eq!(first.name, "action_0");
    assert_eq!(first.action_type, "COMMAND_LINE");
    assert!(!first.force_computation);
    assert!(first.parent_actions.is_empty());
    assert_eq!(doc.actions[2].parent_actions, vec![0]);

    let inputs: Vec<(&str, &str)> = first
        .additional_input
        .iter()
        .map(|kv| (kv.key.as_str(), kv.value.as_str()))
        .collect();
    assert_eq!(
        inputs,
        vec![
            ("sizeInMB", "12.5"),
            ("timeInSeconds", "3"),
            ("nameNode", "hdfs://namenode:8020"),
            ("uniqueRandomInput", "ACT0000000"),
        ]
    );
}

#[test]
fn document_json_uses_camel_case_keys() {
    let json = fork_document().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["startActionId"], 0);
    assert_eq!(value["endActionId"], 2);
    let action = &value["actions"][2];
    assert_eq!(action["actionId"], 2);
    assert_eq!(action["type"], "COMMAND_LINE");
    assert_eq!(action["mainClassName"], "org.example.Main");
    assert_eq!(action["actionFolder"], "/actions");
    assert_eq!(action["forceComputation"], false);
    assert_eq!(action["parentActions"], serde_json::json!([0]));
    assert_eq!(action["additionalInput"][0]["key"], "sizeInMB");
}

#[test]
fn empty_workflow_has_no_document() {
    let doc = WorkflowDocument::from_workflow(
        &GraphBuilder::new().build(),
        &CatalogBuilder::new().build(),
        &metadata(),
        0,
    )
    .unwrap();
    assert!(doc.is_none());
}

#[test]
fn document_parts_rebuild_the_workflow() {
    let (actions, graph) = fork_document().into_parts().unwrap();

    assert_eq!(actions.len(), 3);
    assert_eq!(actions[0].size_mb, 12.5);
    assert_eq!(actions[1].recompute_cost, 1.5);
    assert_eq!(actions[2].name, "ACT0000002");
    let expected: BTreeSet<(usize, usize)> = [(0, 1), (0, 2)].into_iter().collect();
    assert_eq!(edge_set(&graph), expected);
}

#[test]
fn validation_rejects_broken_parent_lists() {
    let mut unknown = fork_document();
    unknown.actions[1].parent_actions = vec![9];
    assert!(validate_document(&unknown).is_err());

    let mut itself = fork_document();
    itself.actions[1].parent_actions = vec![1];
    assert!(validate_document(&itself).is_err());

    let mut duplicate = fork_document();
    let copy = duplicate.actions[1].clone();
    duplicate.actions.push(copy);
    assert!(validate_document(&duplicate).is_err());

    let mut cycle = fork_document();
    cycle.actions[0].parent_actions = vec![2];
    let err = cycle.into_parts().unwrap_err();
    match err {
        CacheboundError::GraphConstruction(msg) => assert!(msg.contains("cycle"), "{msg}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn broken_documents_never_become_graphs() {
    let mut unknown = fork_document();
    unknown.actions[1].parent_actions = vec![9];
    let mut itself = fork_document();
    itself.actions[1].parent_actions = vec![1];
    let mut duplicate = fork_document();
    let copy = duplicate.actions[2].clone();
    duplicate.actions.push(copy);

    for (doc, needle) in [
        (unknown, "unknown parent"),
        (itself, "itself"),
        (duplicate, "more than once"),
    ] {
        match doc.into_parts() {
            Err(CacheboundError::GraphConstruction(msg)) => {
                assert!(msg.contains(needle), "{msg}")
            }
            other => panic!("expected a graph construction error, got {other:?}"),
        }
    }
}

#[test]
fn repeated_parent_is_a_single_edge() {
    let mut doc = fork_document();
    doc.actions[2].parent_actions = vec![0, 0];
    let (_, graph) = doc.into_parts().unwrap();
    assert_eq!(graph.parents_of(2), &[0]);
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn missing_input_key_is_reported() {
    let mut doc = fork_document();
    doc.actions[0].additional_input.retain(|kv| kv.key != "timeInSeconds");
    assert!(matches!(
        doc.into_parts(),
        Err(CacheboundError::GraphConstruction(_))
    ));
}

#[test]
fn history_round_trips_through_a_folder() {
    init_tracing();
    let raw = RawConfigBuilder::new()
        .nb_actions(80)
        .seed(99)
        .folder("out")
        .build();
    let fs = MockFileSystem::new();
    let generated = run_generate(&raw, &fs, false).unwrap();

    let files = fs.files().unwrap();
    assert_eq!(files.len(), generated.history.len());
    assert_eq!(
        files[0],
        Path::new("out").join(workflow_file_name("synthetic", 0))
    );

    let (catalog, read) = read_history(&fs, Path::new("out")).unwrap();
    assert_eq!(catalog, generated.catalog);
    assert_eq!(read.len(), generated.history.len());
    for (written, loaded) in generated.history.iter().zip(read.iter()) {
        assert_eq!(
            written.nodes().collect::<Vec<_>>(),
            loaded.nodes().collect::<Vec<_>>()
        );
        assert_eq!(edge_set(written), edge_set(loaded));
    }
}

#[test]
fn empty_workflows_are_skipped_on_write() {
    let catalog = CatalogBuilder::new().uniform(2, 1.0, 1.0).build();
    let h = history(vec![
        GraphBuilder::new().build(),
        GraphBuilder::new().chain(&[0, 1]).build(),
    ]);
    let fs = MockFileSystem::new();

    let written = write_history(&fs, Path::new("h"), &catalog, &h, &metadata()).unwrap();
    assert_eq!(written, vec![Path::new("h").join("synthetic_000001.json")]);

    let (_, read) = read_history(&fs, Path::new("h")).unwrap();
    assert_eq!(read.len(), 1);
}

#[test]
fn non_json_files_are_ignored() {
    let fs = MockFileSystem::new();
    fs.add_file("h/notes.txt", "not a workflow").unwrap();
    fs.add_file("h/a.json", fork_document().to_json().unwrap())
        .unwrap();

    let (catalog, read) = read_history(&fs, Path::new("h")).unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(read.len(), 1);
}

#[test]
fn conflicting_action_metadata_is_rejected() {
    let fs = MockFileSystem::new();
    let first = fork_document();
    let mut second = fork_document();
    second.actions[0].additional_input[0].value = "99".to_string();

    fs.add_file("h/a.json", first.to_json().unwrap()).unwrap();
    fs.add_file("h/b.json", second.to_json().unwrap()).unwrap();

    let err = read_history(&fs, Path::new("h")).unwrap_err();
    assert!(matches!(err, CacheboundError::GraphConstruction(_)));
}

#[test]
fn malformed_document_is_an_error() {
    let fs = MockFileSystem::new();
    fs.add_file("h/w_000000.json", "{ \"name\": ").unwrap();
    let err = read_history(&fs, Path::new("h")).unwrap_err();
    assert!(matches!(err, CacheboundError::JsonError(_)), "{err:?}");
}

#[test]
fn missing_folder_is_an_error() {
    let fs = MockFileSystem::new();
    assert!(read_history(&fs, Path::new("nowhere")).is_err());
}

#[test]
fn generate_then_evaluate_on_disk() {
    init_tracing();
    let dir = tempdir().unwrap();
    let folder = dir.path().join("history");
    let raw = RawConfigBuilder::new()
        .nb_actions(70)
        .seed(2024)
        .size_limit(120)
        .folder(&folder)
        .build();

    let generated = run_generate(&raw, &RealFileSystem, false).unwrap();
    assert!(folder.is_dir());

    let report = run_evaluate(&raw, &RealFileSystem).unwrap();
    let expected = SimulationOrchestrator::new(&generated.catalog, &generated.history, 120)
        .run()
        .unwrap();

    assert_eq!(report.steps.len(), expected.steps.len());
    let tolerance = 1e-6 * expected.baseline_total_cost.max(1.0);
    assert!((report.total_cost - expected.total_cost).abs() <= tolerance);
    assert!((report.baseline_total_cost - expected.baseline_total_cost).abs() <= tolerance);
    assert!(report.total_cost <= report.baseline_total_cost);
}
