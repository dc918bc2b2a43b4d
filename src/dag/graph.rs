// src/dag/graph.rs

use std::collections::HashMap;

use tracing::debug;

use crate::dag::cycle::find_cycle;
use crate::dag::task_info::{Task, TaskAction, TaskOptions};
use crate::errors::{Result, TaskdagError};
use crate::types::{EdgeKind, TaskName};

/// In-memory task graph keyed by task name.
///
/// Tasks are stored in registration order, which doubles as the
/// deterministic tie-break used when ordering an execution plan and as the
/// order of every listing.
///
/// All mutating calls are atomic: on error the graph is left exactly as it
/// was before the call.
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    tasks: Vec<Task>,
    index: HashMap<TaskName, usize>,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a visible task with the given action.
    pub fn register(&mut self, name: impl Into<TaskName>, action: TaskAction) -> Result<()> {
        self.register_with(name, action, TaskOptions::default())
    }

    /// Register a task with explicit listing options.
    pub fn register_with(
        &mut self,
        name: impl Into<TaskName>,
        action: TaskAction,
        options: TaskOptions,
    ) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(TaskdagError::InvalidTaskName(name));
        }
        if self.index.contains_key(&name) {
            return Err(TaskdagError::DuplicateTask(name));
        }

        debug!(task = %name, visible = options.visible, "registering task");
        self.index.insert(name.clone(), self.tasks.len());
        self.tasks.push(Task::new(name, action, options));
        Ok(())
    }

    /// `from` requires `to`: `to` must succeed before `from` starts.
    pub fn add_requires(&mut self, from: &str, to: &str) -> Result<()> {
        self.add_edge(EdgeKind::Requires, from, to)
    }

    /// `from` is finalized by `to`: `to` runs after `from` whenever `from` runs.
    pub fn add_finalized_by(&mut self, from: &str, to: &str) -> Result<()> {
        self.add_edge(EdgeKind::FinalizedBy, from, to)
    }

    /// `from` must run after `to`, but only if both end up in the same run.
    pub fn add_soft_after(&mut self, from: &str, to: &str) -> Result<()> {
        self.add_edge(EdgeKind::SoftAfter, from, to)
    }

    /// Add a `requires` edge from `from` to every task whose name starts with
    /// `prefix`, skipping `from` itself.
    ///
    /// Returns the names that were matched, in registration order.
    pub fn requires_matching(&mut self, from: &str, prefix: &str) -> Result<Vec<TaskName>> {
        let from_idx = self.index_of_checked(from)?;
        let targets: Vec<TaskName> = self
            .matching_by_prefix(prefix)
            .filter(|name| *name != from)
            .map(str::to_string)
            .collect();

        // Every target is registered and distinct from `from`, so nothing
        // below can fail halfway through.
        let task = &mut self.tasks[from_idx];
        for target in &targets {
            if !task.requires.contains(target) {
                task.requires.push(target.clone());
            }
        }

        debug!(task = %from, prefix, matched = ?targets, "added prefix-matched requires edges");
        Ok(targets)
    }

    /// Names of all tasks starting with `prefix`, in registration order.
    ///
    /// The iterator is lazy and can be restarted by cloning it before
    /// consumption.
    pub fn matching_by_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = &'a str> + Clone + 'a {
        self.tasks
            .iter()
            .map(|t| t.name.as_str())
            .filter(move |name| name.starts_with(prefix))
    }

    /// Check that every edge resolves and that `requires` plus `finalized_by`
    /// edges form no cycle.
    ///
    /// Soft-ordering edges are not considered here; they can only create a
    /// cycle together with a particular set of goals, which is detected when
    /// a plan is built.
    pub fn validate(&self) -> Result<()> {
        for task in &self.tasks {
            let edges = task
                .requires
                .iter()
                .chain(task.finalized_by.iter())
                .chain(task.soft_after.iter());
            for target in edges {
                if !self.index.contains_key(target) {
                    return Err(TaskdagError::UnknownTask(target.clone()));
                }
            }
        }

        let nodes = self.tasks.iter().map(|t| t.name.as_str());
        let mut edges = Vec::new();
        for task in &self.tasks {
            for dep in &task.requires {
                edges.push((dep.as_str(), task.name.as_str()));
            }
            for fin in &task.finalized_by {
                edges.push((task.name.as_str(), fin.as_str()));
            }
        }

        match find_cycle(nodes, edges) {
            Some(path) => Err(TaskdagError::Cycle { path }),
            None => Ok(()),
        }
    }

    /// Names of visible tasks, in registration order.
    pub fn list_visible(&self) -> Vec<&str> {
        self.tasks
            .iter()
            .filter(|t| t.visible)
            .map(|t| t.name.as_str())
            .collect()
    }

    /// Names of all tasks, hidden ones included, in registration order.
    pub fn list_all(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn task(&self, name: &str) -> Option<&Task> {
        self.index.get(name).map(|&idx| &self.tasks[idx])
    }

    /// All tasks in registration order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn requires_of(&self, name: &str) -> &[TaskName] {
        self.task(name).map(|t| t.requires.as_slice()).unwrap_or(&[])
    }

    pub fn finalized_by_of(&self, name: &str) -> &[TaskName] {
        self.task(name).map(|t| t.finalized_by.as_slice()).unwrap_or(&[])
    }

    pub fn soft_after_of(&self, name: &str) -> &[TaskName] {
        self.task(name).map(|t| t.soft_after.as_slice()).unwrap_or(&[])
    }

    /// Registration index of a task, used as the ordering tie-break.
    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub(crate) fn task_at(&self, idx: usize) -> &Task {
        &self.tasks[idx]
    }

    fn index_of_checked(&self, name: &str) -> Result<usize> {
        self.index_of(name)
            .ok_or_else(|| TaskdagError::UnknownTask(name.to_string()))
    }

    fn add_edge(&mut self, kind: EdgeKind, from: &str, to: &str) -> Result<()> {
        let from_idx = self.index_of_checked(from)?;
        self.index_of_checked(to)?;

        if from == to {
            return Err(TaskdagError::InvalidEdge {
                kind,
                from: from.to_string(),
                to: to.to_string(),
                reason: "a task cannot reference itself".to_string(),
            });
        }

        let task = &mut self.tasks[from_idx];
        let edges = match kind {
            EdgeKind::Requires => &mut task.requires,
            EdgeKind::FinalizedBy => &mut task.finalized_by,
            EdgeKind::SoftAfter => &mut task.soft_after,
        };

        if edges.iter().any(|existing| existing == to) {
            debug!(%kind, from, to, "edge already present; ignoring");
            return Ok(());
        }

        edges.push(to.to_string());
        debug!(%kind, from, to, "added edge");
        Ok(())
    }
}
