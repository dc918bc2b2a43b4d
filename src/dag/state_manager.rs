// src/dag/state_manager.rs

//! Per-run state management for tasks in the scheduler.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::dag::plan::ExecutionPlan;
use crate::types::{SkipReason, TaskName, TaskState};

/// Tracks the state of every task in one execution plan.
///
/// Only the legal transitions are applied:
/// `Pending -> Running -> {Succeeded, Failed}` and `Pending -> Skipped`.
/// Anything else is logged and ignored, so a task never leaves a terminal
/// state and never re-enters `Pending`.
#[derive(Debug)]
pub struct StateManager {
    states: Vec<TaskState>,
    skip_reasons: Vec<Option<SkipReason>>,
    positions: HashMap<TaskName, usize>,
}

impl StateManager {
    /// Every task in the plan starts out `Pending`.
    pub fn new(plan: &ExecutionPlan) -> Self {
        let positions = plan
            .entries()
            .iter()
            .enumerate()
            .map(|(pos, entry)| (entry.name.clone(), pos))
            .collect();

        Self {
            states: vec![TaskState::Pending; plan.len()],
            skip_reasons: vec![None; plan.len()],
            positions,
        }
    }

    /// State of a task by name; `None` if the task is not in this run.
    pub fn state_of(&self, task: &str) -> Option<TaskState> {
        self.positions.get(task).map(|&pos| self.states[pos])
    }

    pub fn state_at(&self, pos: usize) -> TaskState {
        self.states[pos]
    }

    pub fn mark_running(&mut self, pos: usize) -> bool {
        self.transition(pos, TaskState::Pending, TaskState::Running)
    }

    pub fn mark_succeeded(&mut self, pos: usize) -> bool {
        self.transition(pos, TaskState::Running, TaskState::Succeeded)
    }

    pub fn mark_failed(&mut self, pos: usize) -> bool {
        self.transition(pos, TaskState::Running, TaskState::Failed)
    }

    pub fn mark_skipped(&mut self, pos: usize, reason: SkipReason) -> bool {
        let applied = self.transition(pos, TaskState::Pending, TaskState::Skipped);
        if applied {
            self.skip_reasons[pos] = Some(reason);
        }
        applied
    }

    pub fn skip_reason_at(&self, pos: usize) -> Option<&SkipReason> {
        self.skip_reasons[pos].as_ref()
    }

    /// First required predecessor that did not succeed, if any.
    ///
    /// Predecessors are always ordered earlier, so by the time this is asked
    /// they are terminal.
    pub fn failed_dependency<'a>(&self, requires: &'a [TaskName]) -> Option<&'a TaskName> {
        requires.iter().find(|dep| {
            matches!(
                self.state_of(dep),
                Some(TaskState::Failed) | Some(TaskState::Skipped)
            )
        })
    }

    /// Whether every task has reached a terminal state.
    pub fn all_tasks_terminal(&self) -> bool {
        self.states.iter().all(|s| s.is_terminal())
    }

    fn transition(&mut self, pos: usize, from: TaskState, to: TaskState) -> bool {
        let current = self.states[pos];
        if current != from {
            warn!(
                position = pos,
                current = %current,
                requested = %to,
                "illegal task state transition; ignoring"
            );
            return false;
        }
        debug!(position = pos, from = %from, to = %to, "task state transition");
        self.states[pos] = to;
        true
    }
}
