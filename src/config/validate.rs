// src/config/validate.rs

use std::collections::HashSet;

use tracing::warn;

use crate::config::model::{ConfigFile, RawConfigFile, TaskConfig};
use crate::dag::{TaskAction, TaskGraph, TaskOptions};
use crate::errors::{Result, TaskdagError};
use crate::exec::ActionFactory;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = TaskdagError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.task))
    }
}

impl ConfigFile {
    /// Build the task graph, asking `factory` for each task's action.
    pub fn build_graph(&self, factory: &dyn ActionFactory) -> Result<TaskGraph> {
        let graph = populate_graph(&self.task, |task| factory.action_for(task))?;
        graph.validate()?;
        Ok(graph)
    }
}

/// Check a raw task file for everything that would make it unusable.
pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_tasks(cfg)?;
    validate_task_names(cfg)?;
    validate_task_references(cfg)?;
    validate_default_tasks(cfg)?;
    validate_graph(cfg)?;
    Ok(())
}

fn ensure_has_tasks(cfg: &RawConfigFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(TaskdagError::ConfigError(
            "config must contain at least one [[task]] entry".to_string(),
        ));
    }
    Ok(())
}

fn validate_task_names(cfg: &RawConfigFile) -> Result<()> {
    let mut seen = HashSet::new();
    for task in &cfg.task {
        if task.name.trim().is_empty() {
            return Err(TaskdagError::ConfigError(
                "every [[task]] needs a non-empty `name`".to_string(),
            ));
        }
        if !seen.insert(task.name.as_str()) {
            return Err(TaskdagError::ConfigError(format!(
                "task '{}' is defined more than once",
                task.name
            )));
        }
    }
    Ok(())
}

fn validate_task_references(cfg: &RawConfigFile) -> Result<()> {
    let names: HashSet<&str> = cfg.task.iter().map(|t| t.name.as_str()).collect();

    for task in &cfg.task {
        let fields = [
            ("requires", &task.requires),
            ("finalized_by", &task.finalized_by),
            ("must_run_after", &task.must_run_after),
        ];
        for (field, refs) in fields {
            for target in refs {
                if !names.contains(target.as_str()) {
                    return Err(TaskdagError::ConfigError(format!(
                        "task '{}' has unknown dependency '{}' in `{}`",
                        task.name, target, field
                    )));
                }
                if *target == task.name {
                    return Err(TaskdagError::ConfigError(format!(
                        "task '{}' cannot reference itself in `{}`",
                        task.name, field
                    )));
                }
            }
        }

        for prefix in &task.requires_prefix {
            let matched = cfg
                .task
                .iter()
                .any(|other| other.name != task.name && other.name.starts_with(prefix.as_str()));
            if !matched {
                warn!(
                    task = %task.name,
                    prefix = %prefix,
                    "`requires_prefix` matches no other task"
                );
            }
        }
    }
    Ok(())
}

fn validate_default_tasks(cfg: &RawConfigFile) -> Result<()> {
    for goal in &cfg.config.default_tasks {
        if !cfg.task.iter().any(|t| t.name == *goal) {
            return Err(TaskdagError::ConfigError(format!(
                "[config].default_tasks names unknown task '{}'",
                goal
            )));
        }
    }
    Ok(())
}

fn validate_graph(cfg: &RawConfigFile) -> Result<()> {
    let graph = populate_graph(&cfg.task, |_| TaskAction::noop())?;
    graph.validate()
}

/// Register every task, then every edge, in declaration order.
fn populate_graph<F>(tasks: &[TaskConfig], mut action_for: F) -> Result<TaskGraph>
where
    F: FnMut(&TaskConfig) -> TaskAction,
{
    let mut graph = TaskGraph::new();

    for task in tasks {
        let mut options = if task.hidden {
            TaskOptions::hidden()
        } else {
            TaskOptions::default()
        };
        options.description = task.description.clone();
        graph.register_with(task.name.clone(), action_for(task), options)?;
    }

    for task in tasks {
        for dep in &task.requires {
            graph.add_requires(&task.name, dep)?;
        }
        for prefix in &task.requires_prefix {
            graph.requires_matching(&task.name, prefix)?;
        }
        for fin in &task.finalized_by {
            graph.add_finalized_by(&task.name, fin)?;
        }
        for soft in &task.must_run_after {
            graph.add_soft_after(&task.name, soft)?;
        }
    }

    Ok(graph)
}
