// src/types.rs

//! Shared vocabulary used across the graph, scheduler and reporting layers.

use std::fmt;

/// Canonical task name type used throughout the crate.
pub type TaskName = String;

/// The three relations a task can have towards another task.
///
/// Each relation lives in its own adjacency map inside
/// [`TaskGraph`](crate::dag::TaskGraph); this enum only exists for error
/// messages and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// `from` requires `to`: `to` must succeed before `from` starts, and `to`
    /// is pulled into the run.
    Requires,
    /// `from` is finalized by `to`: `to` runs after `from`, and is pulled into
    /// the run whenever `from` is.
    FinalizedBy,
    /// `from` must run after `to` if both are in the run; never pulls `to` in.
    SoftAfter,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EdgeKind::Requires => "requires",
            EdgeKind::FinalizedBy => "finalized_by",
            EdgeKind::SoftAfter => "must_run_after",
        };
        f.write_str(s)
    }
}

/// Per-task state within a single execution.
///
/// `Pending -> Running -> {Succeeded, Failed}` or `Pending -> Skipped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Running,
    Succeeded,
    Failed,
    Skipped,
}

impl TaskState {
    /// Whether the state is one of the three terminal states.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TaskState::Succeeded | TaskState::Failed | TaskState::Skipped
        )
    }

    /// Whether the task's action was invoked (successfully or not).
    pub fn has_started(self) -> bool {
        matches!(
            self,
            TaskState::Running | TaskState::Succeeded | TaskState::Failed
        )
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskState::Pending => "pending",
            TaskState::Running => "running",
            TaskState::Succeeded => "succeeded",
            TaskState::Failed => "failed",
            TaskState::Skipped => "skipped",
        };
        f.write_str(s)
    }
}

/// Why a task ended up `Skipped` instead of running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A required predecessor failed or was itself skipped.
    DependencyFailed { dependency: TaskName },
    /// The caller's cancellation signal fired before the task started.
    Cancelled,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::DependencyFailed { dependency } => {
                write!(f, "skipped due to dependency failure ('{dependency}')")
            }
            SkipReason::Cancelled => f.write_str("cancelled"),
        }
    }
}
