// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;

use std::sync::Arc;

use anyhow::{Result, bail};
use tracing::{debug, info};

use crate::cli::{CliArgs, Command};
use crate::config::loader::{default_config_path, load_and_validate};
use crate::config::model::ConfigFile;
use crate::dag::{ExecutionPlan, ExecutionResult, Scheduler, TaskGraph};
use crate::engine::{Runtime, RuntimeOptions};
use crate::exec::ShellActionFactory;
use crate::types::TaskState;

pub use crate::dag::{TaskAction, TaskOptions};
pub use crate::engine::CancelToken;
pub use crate::errors::TaskdagError;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - task file loading
/// - graph construction with shell actions
/// - the requested subcommand (`run`, `tasks`, `plan`)
/// - Ctrl-C handling (inside [`Runtime`])
pub async fn run(args: CliArgs) -> Result<()> {
    let path = args.config.clone().unwrap_or_else(default_config_path);
    debug!(path = %path.display(), "using task file");
    let cfg = load_and_validate(&path)?;
    let factory = ShellActionFactory::new(cfg.config.shell.clone());
    let graph = cfg.build_graph(&factory)?;

    match args.command {
        Command::Tasks { all } => {
            print_tasks(&graph, all);
            Ok(())
        }
        Command::Plan { tasks } => {
            let plan = Scheduler::new(&graph).plan(&tasks)?;
            print_plan(&plan);
            Ok(())
        }
        Command::Run { tasks, dry_run } => {
            let goals = resolve_goals(&cfg, tasks)?;

            if dry_run {
                let plan = Scheduler::new(&graph).plan(&goals)?;
                print_plan(&plan);
                debug!("dry-run complete (no execution)");
                return Ok(());
            }

            let runtime = Runtime::new(Arc::new(graph), RuntimeOptions::default());
            let result = runtime.run(goals).await?;
            print_summary(&result);
            result.into_result()?;
            Ok(())
        }
    }
}

/// Goals from the command line, falling back to `[config].default_tasks`.
fn resolve_goals(cfg: &ConfigFile, tasks: Vec<String>) -> Result<Vec<String>> {
    if !tasks.is_empty() {
        return Ok(tasks);
    }
    if cfg.config.default_tasks.is_empty() {
        bail!("no tasks given and [config].default_tasks is empty");
    }
    info!(goals = ?cfg.config.default_tasks, "using default tasks");
    Ok(cfg.config.default_tasks.clone())
}

/// `tasks` / `tasks --all` output.
fn print_tasks(graph: &TaskGraph, all: bool) {
    let names = if all {
        graph.list_all()
    } else {
        graph.list_visible()
    };

    println!("tasks ({}):", names.len());
    for name in names {
        let description = graph.task(name).and_then(|t| t.description());
        match description {
            Some(d) => println!("  {name} - {d}"),
            None => println!("  {name}"),
        }
    }
}

fn print_plan(plan: &ExecutionPlan) {
    println!("execution plan ({} tasks):", plan.len());
    for (i, entry) in plan.entries().iter().enumerate() {
        match entry.inclusion {
            dag::Inclusion::Demanded => println!("  {:>3}. {}", i + 1, entry.name),
            dag::Inclusion::Finalizer => {
                println!("  {:>3}. {} (finalizer)", i + 1, entry.name)
            }
        }
    }
}

fn print_summary(result: &ExecutionResult) {
    println!();
    for report in result.reports() {
        let state = report.state.to_string();
        match (report.state, &report.skip_reason, &report.error) {
            (TaskState::Skipped, Some(reason), _) => {
                println!("  {state:<9} {} ({reason})", report.name)
            }
            (TaskState::Failed, _, Some(err)) => {
                println!("  {state:<9} {} ({err:#})", report.name)
            }
            _ => println!("  {state:<9} {}", report.name),
        }
    }
    if result.is_success() {
        println!("BUILD SUCCESSFUL ({} tasks)", result.executed().len());
    } else {
        println!("BUILD FAILED");
    }
}
