//! Shared fixtures for the `taskdag` integration tests.

pub mod builders;
pub mod recorder;

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt};

static TRACING: Once = Once::new();

/// Install a test-captured subscriber once per test binary.
///
/// Reads the same `TASKDAG_LOG` directives as the binary (falling back to
/// `RUST_LOG`, then `info`). Output only shows for failing tests unless the
/// harness runs with `--nocapture`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_env(taskdag::logging::LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}
