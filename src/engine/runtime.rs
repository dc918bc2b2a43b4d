// src/engine/runtime.rs

use std::fmt;
use std::sync::Arc;

use anyhow::anyhow;
use tracing::{debug, info, warn};

use crate::dag::{ExecutionResult, Scheduler, TaskGraph};
use crate::errors::{Result, TaskdagError};
use crate::types::TaskName;

use super::{CancelToken, RuntimeOptions};

/// Async shell around the synchronous [`Scheduler`].
///
/// Task actions are blocking callables, so a run is executed on Tokio's
/// blocking pool. While it runs, the shell optionally listens for Ctrl-C
/// and turns it into a cancellation: tasks that have not started yet are
/// skipped, the one currently running is left to finish.
pub struct Runtime {
    graph: Arc<TaskGraph>,
    options: RuntimeOptions,
    cancel: CancelToken,
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("tasks", &self.graph.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Runtime {
    pub fn new(graph: Arc<TaskGraph>, options: RuntimeOptions) -> Self {
        Self {
            graph,
            options,
            cancel: CancelToken::new(),
        }
    }

    /// Token that cancels the run started by [`run`](Self::run).
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Execute `goals` to completion (or cancellation).
    pub async fn run(&self, goals: Vec<TaskName>) -> Result<ExecutionResult> {
        info!(?goals, "taskdag runtime started");

        let graph = Arc::clone(&self.graph);
        let cancel = self.cancel.clone();
        let mut handle = tokio::task::spawn_blocking(move || {
            Scheduler::new(&graph).execute_with_cancel(&goals, &cancel)
        });

        let joined = if self.options.cancel_on_ctrl_c {
            tokio::select! {
                joined = &mut handle => joined,
                signal = tokio::signal::ctrl_c() => {
                    match signal {
                        Ok(()) => {
                            warn!("Ctrl-C received; cancelling tasks that have not started");
                            self.cancel.cancel();
                        }
                        Err(e) => warn!(error = %e, "failed to listen for Ctrl-C"),
                    }
                    handle.await
                }
            }
        } else {
            handle.await
        };

        let result = joined
            .map_err(|e| TaskdagError::Other(anyhow!("scheduler thread failed: {e}")))??;

        debug!(
            executed = ?result.executed(),
            skipped = ?result.skipped(),
            "runtime exiting"
        );
        Ok(result)
    }
}
