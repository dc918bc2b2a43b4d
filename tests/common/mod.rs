#![allow(dead_code)]

pub use taskdag_test_utils::{builders, init_tracing, recorder};

use taskdag::dag::ExecutionResult;

/// Position of `task` in the run's plan order.
pub fn position(result: &ExecutionResult, task: &str) -> usize {
    result
        .order()
        .iter()
        .position(|name| *name == task)
        .unwrap_or_else(|| panic!("task {task} not in plan"))
}
