//! Common helpers for integration tests.
//! Some helpers are only used by specific test binaries; allow dead_code to avoid per-binary warnings.
#![allow(dead_code)]

use acceptor::ConfirmationTracker;
use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber once per binary (`RUST_LOG` overrides the default).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("acceptor=debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Make one `submit(1, batch)` call per batch on a fresh tracker; returns the last result.
pub fn submit_batches(batches: &[&[&str]]) -> u64 {
    let tracker = ConfirmationTracker::new();
    let mut height = 0;
    for batch in batches {
        height = tracker.submit(1, batch);
    }
    height
}

/// Submit the same batch `times` times at `start_height`.
pub fn repeat(tracker: &ConfirmationTracker, start_height: u64, batch: &[&str], times: usize) -> u64 {
    let mut height = tracker.accepted_height();
    for _ in 0..times {
        height = tracker.submit(start_height, batch);
    }
    height
}
