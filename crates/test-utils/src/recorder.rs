use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use anyhow::bail;
use taskdag::config::TaskConfig;
use taskdag::dag::TaskAction;
use taskdag::exec::ActionFactory;

/// Hands out actions that:
/// - record the task name in a shared log when invoked
/// - fail (after recording) for tasks marked as failing.
#[derive(Debug, Clone, Default)]
pub struct ActionRecorder {
    executed: Arc<Mutex<Vec<String>>>,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl ActionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the action for `task` return an error.
    pub fn fail(&self, task: &str) {
        self.failing.lock().unwrap().insert(task.to_string());
    }

    pub fn action(&self, task: &str) -> TaskAction {
        let name = task.to_string();
        let executed = Arc::clone(&self.executed);
        let failing = Arc::clone(&self.failing);

        TaskAction::new(move || {
            executed.lock().unwrap().push(name.clone());
            if failing.lock().unwrap().contains(&name) {
                bail!("{name} failed on purpose");
            }
            Ok(())
        })
    }

    /// Task names in invocation order.
    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.executed.lock().unwrap().clear();
    }
}

impl ActionFactory for ActionRecorder {
    fn action_for(&self, task: &TaskConfig) -> TaskAction {
        self.action(&task.name)
    }
}
