// src/engine/cancel.rs

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Caller-supplied cancellation signal for a run.
///
/// Cloning shares the flag. The scheduler checks it before starting each
/// task; a task that is already running is always allowed to finish.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
