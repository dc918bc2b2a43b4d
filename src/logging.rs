// src/logging.rs

//! `tracing` subscriber setup for the `taskdag` binary.
//!
//! The filter is chosen in this order:
//! 1. `--log-level` on the command line, applied to every target
//! 2. `TASKDAG_LOG`, parsed as `EnvFilter` directives
//!    (`debug`, `taskdag::dag=trace,info`, ...)
//! 3. `info`
//!
//! Output goes to stderr; stdout belongs to the tasks being run.

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "TASKDAG_LOG";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let filter = build_filter(cli_level, std::env::var(LOG_ENV).ok().as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to initialise logging")
}

/// Resolve the filter from the CLI level and the raw `TASKDAG_LOG` value.
///
/// Invalid directives in the environment fall back to `info` rather than
/// refusing to start.
pub fn build_filter(cli_level: Option<LogLevel>, env_value: Option<&str>) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::default().add_directive(level_filter(level).into());
    }

    match env_value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives).unwrap_or_else(|err| {
            eprintln!("taskdag: ignoring invalid {LOG_ENV} value {directives:?}: {err}");
            EnvFilter::new("info")
        }),
        None => EnvFilter::new("info"),
    }
}

fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    }
}
