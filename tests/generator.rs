// tests/generator.rs

mod common;

use std::collections::BTreeSet;

use proptest::prelude::*;

use cachebound::fs::FileSystem;
use cachebound::fs::mock::MockFileSystem;
use cachebound::generator::builder::connect_candidates;
use cachebound::generator::{HistoryGenerator, generate_history};
use cachebound::run_generate;
use cachebound::types::ActionId;
use cachebound_test_utils::builders::{GraphBuilder, RawConfigBuilder};
use cachebound_test_utils::{init_tracing, seeded_rng};

use common::{edge_set, generation_params, petgraph_is_cyclic};

#[test]
fn connect_candidates_absorbs_whole_paths() {
    // 0 -> 1 -> 2, 3 on its own.
    let union = GraphBuilder::new().chain(&[0, 1, 2]).node(3).build();

    let included = connect_candidates(&union, vec![0, 2, 3]);
    assert_eq!(included, vec![0, 1, 2, 3]);
}

#[test]
fn connect_candidates_drops_a_source_that_reaches_nothing() {
    let union = GraphBuilder::new().chain(&[0, 1, 2]).build();

    // 2 reaches neither 0 nor 1 and is dropped after its round; 0 then
    // reaches 1 directly.
    let included = connect_candidates(&union, vec![2, 0, 1]);
    assert_eq!(included, vec![0, 1]);
}

#[test]
fn connect_candidates_handles_trivial_inputs() {
    let union = GraphBuilder::new().chain(&[0, 1]).build();

    assert!(connect_candidates(&union, vec![]).is_empty());
    assert_eq!(connect_candidates(&union, vec![1]), vec![1]);
}

#[test]
fn connect_candidates_does_not_repeat_shared_path_nodes() {
    // 0 -> 1 -> 2 and 1 -> 3.
    let union = GraphBuilder::new().chain(&[0, 1, 2]).edge(1, 3).build();

    let included = connect_candidates(&union, vec![0, 2, 3]);
    assert_eq!(included, vec![0, 1, 2, 3]);
}

#[test]
fn catalog_actions_are_well_formed() {
    init_tracing();
    let params = generation_params(&RawConfigBuilder::new().nb_actions(120).build());
    let generated = generate_history(&params, &mut seeded_rng(11)).unwrap();

    assert_eq!(generated.catalog.len(), 120);
    let mut labels = BTreeSet::new();
    for (expected_id, action) in generated.catalog.iter().enumerate() {
        assert_eq!(action.id, expected_id);
        assert!(action.size_mb >= 0.0);
        assert!(action.recompute_cost >= 0.0);
        assert_eq!(action.name.len(), 10);
        assert!(
            action
                .name
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
        assert!(labels.insert(action.name.clone()), "duplicate label");
    }
}

#[test]
fn generator_stops_once_the_budget_is_spent() {
    init_tracing();
    let params = generation_params(&RawConfigBuilder::new().nb_actions(25).build());
    let mut generator = HistoryGenerator::new(&params).unwrap();
    let mut rng = seeded_rng(3);

    while generator.step(&mut rng).unwrap().is_some() {
        assert!(generator.used_actions() <= 25);
    }
    assert!(generator.is_exhausted());
    assert_eq!(generator.used_actions(), 25);
    assert_eq!(generator.union().len(), 25);
    assert!(generator.step(&mut rng).unwrap().is_none());
}

#[test]
fn no_reuse_produces_disjoint_workflows() {
    let raw = RawConfigBuilder::new()
        .nb_actions(40)
        .previous_actions(0.0, 0.0)
        .build();
    let generated = generate_history(&generation_params(&raw), &mut seeded_rng(5)).unwrap();

    let mut seen = BTreeSet::new();
    for workflow in generated.history.iter() {
        for id in workflow.nodes() {
            assert!(seen.insert(id), "action {id} reused without reuse");
        }
    }
    assert!(generated.steps.iter().all(|s| s.reused == 0));
}

#[test]
fn same_seed_writes_identical_files() {
    init_tracing();
    let raw = RawConfigBuilder::new()
        .nb_actions(50)
        .seed(1234)
        .folder("out")
        .build();

    let first = MockFileSystem::new();
    let second = MockFileSystem::new();
    let a = run_generate(&raw, &first, false).unwrap();
    let b = run_generate(&raw, &second, false).unwrap();
    assert_eq!(a, b);

    let files = first.files().unwrap();
    assert!(!files.is_empty());
    assert_eq!(files, second.files().unwrap());
    for path in &files {
        assert_eq!(
            first.read_to_string(path).unwrap(),
            second.read_to_string(path).unwrap()
        );
    }
}

#[test]
fn dry_run_writes_nothing() {
    let raw = RawConfigBuilder::new().nb_actions(20).folder("out").build();
    let fs = MockFileSystem::new();

    let generated = run_generate(&raw, &fs, true).unwrap();
    assert!(!generated.history.is_empty());
    assert!(fs.files().unwrap().is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn generated_workflows_are_acyclic(nb_actions in 1usize..90, seed in any::<u64>()) {
        let params = generation_params(&RawConfigBuilder::new().nb_actions(nb_actions).build());
        let generated = generate_history(&params, &mut seeded_rng(seed)).unwrap();

        for workflow in generated.history.iter() {
            prop_assert!(workflow.is_acyclic());
            prop_assert!(!petgraph_is_cyclic(workflow));
        }
        prop_assert!(generated.union.is_acyclic());
        prop_assert!(!petgraph_is_cyclic(&generated.union));
    }

    #[test]
    fn every_action_is_introduced_exactly_once(nb_actions in 1usize..90, seed in any::<u64>()) {
        let params = generation_params(&RawConfigBuilder::new().nb_actions(nb_actions).build());
        let generated = generate_history(&params, &mut seeded_rng(seed)).unwrap();

        let introduced: usize = generated.steps.iter().map(|s| s.introduced).sum();
        prop_assert_eq!(introduced, nb_actions);

        let union_nodes: Vec<ActionId> = generated.union.nodes().collect();
        prop_assert_eq!(union_nodes, (0..nb_actions).collect::<Vec<_>>());

        // Fresh ids of each workflow form the next contiguous range.
        let mut seen: BTreeSet<ActionId> = BTreeSet::new();
        for (step, workflow) in generated.steps.iter().zip(generated.history.iter()) {
            prop_assert!(step.introduced >= 1);
            let fresh: Vec<ActionId> = workflow.nodes().filter(|id| !seen.contains(id)).collect();
            let expected: Vec<ActionId> = (seen.len()..seen.len() + step.introduced).collect();
            prop_assert_eq!(fresh, expected);
            seen.extend(workflow.nodes());
        }
    }

    #[test]
    fn workflows_are_subgraphs_of_the_union(nb_actions in 1usize..60, seed in any::<u64>()) {
        let params = generation_params(&RawConfigBuilder::new().nb_actions(nb_actions).build());
        let generated = generate_history(&params, &mut seeded_rng(seed)).unwrap();

        let union_edges = edge_set(&generated.union);
        for workflow in generated.history.iter() {
            prop_assert!(edge_set(workflow).is_subset(&union_edges));
            prop_assert!(workflow.nodes().all(|id| generated.union.contains(id)));
        }
    }

    #[test]
    fn generation_is_reproducible(nb_actions in 1usize..60, seed in any::<u64>()) {
        let params = generation_params(&RawConfigBuilder::new().nb_actions(nb_actions).build());
        let a = generate_history(&params, &mut seeded_rng(seed)).unwrap();
        let b = generate_history(&params, &mut seeded_rng(seed)).unwrap();
        prop_assert_eq!(a, b);
    }
}
