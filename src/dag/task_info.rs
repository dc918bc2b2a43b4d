// src/dag/task_info.rs

//! Task nodes owned by the [`TaskGraph`](crate::dag::TaskGraph).

use std::fmt;
use std::sync::Arc;

use crate::types::TaskName;

/// Opaque unit of work attached to a task.
///
/// The scheduler never looks inside an action; it only invokes it and
/// records whether it returned `Ok` or `Err`.
#[derive(Clone)]
pub struct TaskAction(Arc<dyn Fn() -> anyhow::Result<()> + Send + Sync>);

impl TaskAction {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// An action that does nothing and always succeeds.
    ///
    /// Handy for lifecycle/aggregate tasks such as `getReady`.
    pub fn noop() -> Self {
        Self::new(|| Ok(()))
    }

    pub(crate) fn invoke(&self) -> anyhow::Result<()> {
        (self.0)()
    }
}

impl fmt::Debug for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TaskAction(..)")
    }
}

/// Registration-time attributes that do not affect ordering.
#[derive(Debug, Clone)]
pub struct TaskOptions {
    /// Whether the task shows up in [`TaskGraph::list_visible`](crate::dag::TaskGraph::list_visible).
    pub visible: bool,
    /// Optional one-line description used in task listings.
    pub description: Option<String>,
}

impl Default for TaskOptions {
    fn default() -> Self {
        Self {
            visible: true,
            description: None,
        }
    }
}

impl TaskOptions {
    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A registered task: identity, action, listing attributes and its three
/// outgoing edge sets.
///
/// Edge sets are kept in insertion order and never contain duplicates.
#[derive(Debug, Clone)]
pub struct Task {
    pub(crate) name: TaskName,
    pub(crate) action: TaskAction,
    pub(crate) visible: bool,
    pub(crate) description: Option<String>,
    /// Tasks that must succeed before this one starts.
    pub(crate) requires: Vec<TaskName>,
    /// Tasks that must run after this one, pulled in whenever it runs.
    pub(crate) finalized_by: Vec<TaskName>,
    /// Tasks that must come first *if* they are part of the same run.
    pub(crate) soft_after: Vec<TaskName>,
}

impl Task {
    pub(crate) fn new(name: TaskName, action: TaskAction, options: TaskOptions) -> Self {
        Self {
            name,
            action,
            visible: options.visible,
            description: options.description,
            requires: Vec::new(),
            finalized_by: Vec::new(),
            soft_after: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn requires(&self) -> &[TaskName] {
        &self.requires
    }

    pub fn finalized_by(&self) -> &[TaskName] {
        &self.finalized_by
    }

    pub fn soft_after(&self) -> &[TaskName] {
        &self.soft_after
    }

    pub(crate) fn action(&self) -> &TaskAction {
        &self.action
    }
}
