// src/engine/mod.rs

//! Orchestration around the scheduler.
//!
//! The scheduler itself is synchronous and lives in [`crate::dag`]. This
//! module adds:
//! - the caller-facing cancellation signal ([`cancel`])
//! - an async shell that runs a plan off the async threads and maps Ctrl-C
//!   to cancellation ([`runtime`])

pub mod cancel;
pub mod runtime;

pub use cancel::CancelToken;
pub use runtime::Runtime;

/// Runtime options for the async shell.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeOptions {
    /// If true, Ctrl-C cancels the run instead of killing the process.
    pub cancel_on_ctrl_c: bool,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            cancel_on_ctrl_c: true,
        }
    }
}
