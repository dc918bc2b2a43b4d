// src/exec/backend.rs

//! Pluggable action construction.
//!
//! Graphs loaded from a task file get their actions from an
//! [`ActionFactory`] instead of building processes directly. This makes it
//! easy to swap in a recording factory in tests while keeping the production
//! shell implementation in [`command`](super::command).

use crate::config::TaskConfig;
use crate::dag::TaskAction;

use super::command::shell_action;

/// Turns a task definition into the opaque action the scheduler invokes.
pub trait ActionFactory {
    fn action_for(&self, task: &TaskConfig) -> TaskAction;
}

/// Production factory: runs each task's `cmd` through a shell.
///
/// Tasks without a `cmd` get a no-op action.
#[derive(Debug, Clone)]
pub struct ShellActionFactory {
    shell: String,
}

impl ShellActionFactory {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl ActionFactory for ShellActionFactory {
    fn action_for(&self, task: &TaskConfig) -> TaskAction {
        match task.cmd.as_deref() {
            Some(cmd) => shell_action(&task.name, &self.shell, cmd),
            None => TaskAction::noop(),
        }
    }
}
