// src/dag/execution_result.rs

//! Outcome of a single `execute` call.

use std::time::Duration;

use crate::errors::{Result, TaskdagError};
use crate::types::{SkipReason, TaskName, TaskState};

/// Terminal fate of one task in the run.
#[derive(Debug)]
pub struct TaskReport {
    pub name: TaskName,
    pub state: TaskState,
    /// Set when `state == Skipped`.
    pub skip_reason: Option<SkipReason>,
    /// Error returned (or panic raised) by the action, when `state == Failed`.
    pub error: Option<anyhow::Error>,
    /// Wall-clock time spent in the action, for tasks that ran.
    pub duration: Option<Duration>,
}

/// Overall verdict of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Succeeded,
    /// At least one task failed; `first_failure` is the earliest in plan order.
    Failed { first_failure: TaskName },
}

/// Per-task reports for a whole run, in plan order.
///
/// Task-level failures never turn into an `Err` from `execute`; they are
/// reported here so callers can inspect the whole run.
#[derive(Debug, Default)]
pub struct ExecutionResult {
    reports: Vec<TaskReport>,
}

impl ExecutionResult {
    pub(crate) fn new(reports: Vec<TaskReport>) -> Self {
        Self { reports }
    }

    pub fn reports(&self) -> &[TaskReport] {
        &self.reports
    }

    pub fn report(&self, task: &str) -> Option<&TaskReport> {
        self.reports.iter().find(|r| r.name == task)
    }

    pub fn state_of(&self, task: &str) -> Option<TaskState> {
        self.report(task).map(|r| r.state)
    }

    /// Plan order of every task in the closure.
    pub fn order(&self) -> Vec<&str> {
        self.reports.iter().map(|r| r.name.as_str()).collect()
    }

    /// Tasks whose action was actually invoked, in invocation order.
    pub fn executed(&self) -> Vec<&str> {
        self.reports
            .iter()
            .filter(|r| r.state.has_started())
            .map(|r| r.name.as_str())
            .collect()
    }

    pub fn skipped(&self) -> Vec<&str> {
        self.reports
            .iter()
            .filter(|r| r.state == TaskState::Skipped)
            .map(|r| r.name.as_str())
            .collect()
    }

    pub fn first_failure(&self) -> Option<&TaskReport> {
        self.reports.iter().find(|r| r.state == TaskState::Failed)
    }

    pub fn status(&self) -> RunStatus {
        match self.first_failure() {
            Some(report) => RunStatus::Failed {
                first_failure: report.name.clone(),
            },
            None => RunStatus::Succeeded,
        }
    }

    pub fn is_success(&self) -> bool {
        self.first_failure().is_none()
    }

    /// Whether any task was skipped because the run was cancelled.
    pub fn was_cancelled(&self) -> bool {
        self.reports
            .iter()
            .any(|r| r.skip_reason == Some(SkipReason::Cancelled))
    }

    /// Turn a failed run into [`TaskdagError::TaskFailed`] carrying the first
    /// failure's error.
    pub fn into_result(mut self) -> Result<Self> {
        let Some(pos) = self
            .reports
            .iter()
            .position(|r| r.state == TaskState::Failed)
        else {
            return Ok(self);
        };

        let report = &mut self.reports[pos];
        let source = report
            .error
            .take()
            .unwrap_or_else(|| anyhow::anyhow!("task failed without an error"));
        Err(TaskdagError::TaskFailed {
            task: report.name.clone(),
            source,
        })
    }
}
