// src/logging.rs

//! Structured logging on stderr; stdout is reserved for results.
//!
//! The filter comes from, in order:
//! 1. `--log-level`, applied to every target;
//! 2. `CACHEBOUND_LOG`, in `EnvFilter` directive syntax, so a single stage
//!    can be opened up (`CACHEBOUND_LOG=info,cachebound::evaluator=debug`);
//! 3. `info`.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

pub const LOG_ENV: &str = "CACHEBOUND_LOG";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let filter = match cli_level {
        Some(level) => EnvFilter::new(level.as_directive()),
        None => env_filter(std::env::var(LOG_ENV).ok().as_deref()),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))
}

/// Filter for a raw `CACHEBOUND_LOG` value; unset or unparsable values fall
/// back to `info`.
pub fn env_filter(raw: Option<&str>) -> EnvFilter {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

impl LogLevel {
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
