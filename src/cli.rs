// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `cachebound`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cachebound",
    version,
    about = "Synthetic workflow histories and their ideal caching computation time.",
    long_about = None
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CACHEBOUND_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Generate a history and write one JSON document per workflow to
    /// `output_folder_path`.
    Generate {
        /// Path to the config document (JSON, or TOML with a `.toml` extension).
        #[arg(value_name = "CONFIG")]
        config: PathBuf,

        /// Seed for the random source; overrides `seed` in the config.
        #[arg(long, value_name = "N")]
        seed: Option<u64>,

        /// Generate and print a summary, but don't write any files.
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the ideal computation time of the history in `history_folder`.
    Evaluate {
        /// Path to the config document (JSON, or TOML with a `.toml` extension).
        #[arg(value_name = "CONFIG")]
        config: PathBuf,

        /// Cache capacity in MB; overrides `size_limit` in the config.
        #[arg(long, value_name = "MB")]
        size_limit: Option<i64>,

        /// History folder; overrides `history_folder` in the config.
        #[arg(long, value_name = "PATH")]
        history_folder: Option<PathBuf>,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
