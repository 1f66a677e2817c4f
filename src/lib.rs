// src/lib.rs

pub mod catalog;
pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod evaluator;
pub mod fs;
pub mod generator;
pub mod history;
pub mod io;
pub mod logging;
pub mod types;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::cli::{CliArgs, Command};
use crate::config::{EvaluatorConfig, GeneratorConfig, RawConfigFile, load_from_path};
use crate::errors::Result;
use crate::evaluator::{EvaluationReport, SimulationOrchestrator};
use crate::fs::{FileSystem, RealFileSystem};
use crate::generator::{GeneratedHistory, generate_history};

/// High-level entry point used by `main.rs`.
///
/// Loads the config document, applies CLI overrides, and runs either the
/// generator or the evaluator against the real filesystem.
pub fn run(args: CliArgs) -> anyhow::Result<()> {
    match args.command {
        Command::Generate {
            config,
            seed,
            dry_run,
        } => {
            let mut raw = load_from_path(&config)?;
            if seed.is_some() {
                raw.seed = seed;
            }
            let generated = run_generate(&raw, &RealFileSystem, dry_run)?;
            print_summary(&generated);
        }
        Command::Evaluate {
            config,
            size_limit,
            history_folder,
        } => {
            let mut raw = load_from_path(&config)?;
            if size_limit.is_some() {
                raw.size_limit = size_limit;
            }
            if history_folder.is_some() {
                raw.history_folder = history_folder;
            }
            let report = run_evaluate(&raw, &RealFileSystem)?;
            println!("{}", report.total_cost);
        }
    }
    Ok(())
}

/// Generate a history from `raw` and, unless `dry_run`, write it to the
/// configured output folder through `fs`.
pub fn run_generate(
    raw: &RawConfigFile,
    fs: &dyn FileSystem,
    dry_run: bool,
) -> Result<GeneratedHistory> {
    let cfg = GeneratorConfig::try_from(raw)?;
    let seed = cfg.seed.unwrap_or_else(rand::random);
    info!(seed, nb_actions = cfg.params.nb_actions, "generating history");

    let mut rng = StdRng::seed_from_u64(seed);
    let generated = generate_history(&cfg.params, &mut rng)?;

    if !dry_run {
        io::write_history(
            fs,
            &cfg.output_folder,
            &generated.catalog,
            &generated.history,
            &cfg.metadata,
        )?;
    }
    Ok(generated)
}

/// Read the configured history folder through `fs` and evaluate it.
pub fn run_evaluate(raw: &RawConfigFile, fs: &dyn FileSystem) -> Result<EvaluationReport> {
    let cfg = EvaluatorConfig::try_from(raw)?;
    let (catalog, history) = io::read_history(fs, &cfg.history_folder)?;

    let report = SimulationOrchestrator::new(&catalog, &history, cfg.size_limit)
        .with_policy(cfg.candidate_policy)
        .run()?;

    info!(
        ideal = report.total_cost,
        uncached = report.baseline_total_cost,
        savings = report.savings(),
        "ideal computation time"
    );
    Ok(report)
}

/// Summary of a generated history on stdout.
fn print_summary(generated: &GeneratedHistory) {
    println!("cachebound history");
    println!("  actions = {}", generated.catalog.len());
    println!("  workflows = {}", generated.history.len());
    println!("  union edges = {}", generated.union.edge_count());
    println!();

    for (step, workflow) in generated.steps.iter().zip(generated.history.iter()) {
        println!(
            "  - workflow {}: {} actions ({} reused, {} new), {} edges, {} sources, {} sinks",
            step.index,
            workflow.len(),
            step.reused,
            step.introduced,
            workflow.edge_count(),
            workflow.sources().len(),
            workflow.sinks().len()
        );
    }
}
