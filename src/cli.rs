// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `taskdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskdag",
    version,
    about = "Run tasks in dependency, finalizer and soft order.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the task file (TOML).
    ///
    /// Default: `$TASKDAG_CONFIG`, else `Taskdag.toml` in the current directory.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKDAG_LOG` directives or `info` are used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the given tasks (or `[config].default_tasks`) and everything they pull in.
    Run {
        /// Goal task names.
        #[arg(value_name = "TASK")]
        tasks: Vec<String>,

        /// Print the execution plan without running anything.
        #[arg(long)]
        dry_run: bool,
    },

    /// List tasks in declaration order.
    Tasks {
        /// Include hidden tasks.
        #[arg(long)]
        all: bool,
    },

    /// Print the execution plan for the given tasks.
    Plan {
        #[arg(value_name = "TASK", required = true)]
        tasks: Vec<String>,
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
