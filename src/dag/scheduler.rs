// src/dag/scheduler.rs

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::dag::execution_result::{ExecutionResult, TaskReport};
use crate::dag::graph::TaskGraph;
use crate::dag::plan::ExecutionPlan;
use crate::dag::state_manager::StateManager;
use crate::engine::CancelToken;
use crate::errors::Result;
use crate::types::SkipReason;

/// Runs goal tasks of a [`TaskGraph`] one at a time, in plan order.
///
/// The scheduler only borrows the graph, so the graph cannot be mutated
/// while a run is in progress.
///
/// It is responsible for:
/// - computing the closure and order of a run (see [`ExecutionPlan`])
/// - invoking each task's action at most once
/// - skipping tasks whose required predecessors failed
/// - always running finalizers of every scheduled task, even one that
///   failed or was skipped
/// - honouring the caller's cancellation signal between tasks
#[derive(Debug, Clone, Copy)]
pub struct Scheduler<'g> {
    graph: &'g TaskGraph,
}

impl<'g> Scheduler<'g> {
    pub fn new(graph: &'g TaskGraph) -> Self {
        Self { graph }
    }

    /// Compute the plan for `goals` without running anything.
    pub fn plan<I, S>(&self, goals: I) -> Result<ExecutionPlan>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ExecutionPlan::build(self.graph, goals)
    }

    /// Run `goals` and everything they pull in.
    ///
    /// Fails only for unknown goals or an unorderable closure; task-level
    /// failures are reported in the returned [`ExecutionResult`].
    pub fn execute<I, S>(&self, goals: I) -> Result<ExecutionResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.execute_with_cancel(goals, &CancelToken::new())
    }

    /// Like [`execute`](Self::execute), checking `cancel` before each task.
    pub fn execute_with_cancel<I, S>(&self, goals: I, cancel: &CancelToken) -> Result<ExecutionResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let plan = self.plan(goals)?;
        Ok(self.run_plan(&plan, cancel))
    }

    /// Execute an already computed plan.
    pub fn run_plan(&self, plan: &ExecutionPlan, cancel: &CancelToken) -> ExecutionResult {
        info!(tasks = plan.len(), "starting run");

        let mut states = StateManager::new(plan);
        let mut reports = Vec::with_capacity(plan.len());

        for (pos, entry) in plan.entries().iter().enumerate() {
            let Some(task) = self.graph.task(&entry.name) else {
                warn!(task = %entry.name, "planned task missing from graph; skipping");
                continue;
            };

            let skip = if cancel.is_cancelled() {
                Some(SkipReason::Cancelled)
            } else if let Some(dep) = states.failed_dependency(&task.requires) {
                Some(SkipReason::DependencyFailed {
                    dependency: dep.clone(),
                })
            } else {
                None
            };

            if let Some(reason) = skip {
                warn!(task = %task.name, %reason, "skipping task");
                states.mark_skipped(pos, reason);
                reports.push(TaskReport {
                    name: task.name.clone(),
                    state: states.state_at(pos),
                    skip_reason: states.skip_reason_at(pos).cloned(),
                    error: None,
                    duration: None,
                });
                continue;
            }

            states.mark_running(pos);
            info!(task = %task.name, "running task");

            let started = Instant::now();
            let outcome = invoke_action(task.action());
            let duration = started.elapsed();

            let error = match outcome {
                Ok(()) => {
                    states.mark_succeeded(pos);
                    info!(task = %task.name, elapsed_ms = duration.as_millis() as u64, "task succeeded");
                    None
                }
                Err(err) => {
                    states.mark_failed(pos);
                    warn!(task = %task.name, error = %format!("{err:#}"), "task failed");
                    Some(err)
                }
            };

            reports.push(TaskReport {
                name: task.name.clone(),
                state: states.state_at(pos),
                skip_reason: states.skip_reason_at(pos).cloned(),
                error,
                duration: Some(duration),
            });
        }

        debug!(all_terminal = states.all_tasks_terminal(), "run finished");
        let result = ExecutionResult::new(reports);
        match result.first_failure() {
            Some(report) => warn!(first_failure = %report.name, "run failed"),
            None => info!("run succeeded"),
        }
        result
    }
}

/// Invoke an action, turning a panic into an ordinary failure.
fn invoke_action(action: &crate::dag::TaskAction) -> anyhow::Result<()> {
    match panic::catch_unwind(AssertUnwindSafe(|| action.invoke())) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_string());
            Err(anyhow::anyhow!("task panicked: {message}"))
        }
    }
}
