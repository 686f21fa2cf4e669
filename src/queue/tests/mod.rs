//! Test modules for the work queue
//!
//! Tests are organized by functional area for better maintainability.

mod concurrent;

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Generous bound for operations that are expected to complete
pub(super) const COMPLETES_WITHIN: Duration = Duration::from_secs(5);

/// Short window used to check that something is still blocked
pub(super) const STAYS_BLOCKED_FOR: Duration = Duration::from_millis(100);

/// Run a blocking closure on its own thread and fail the test if it hangs
pub(super) fn within<R, F>(timeout: Duration, f: F) -> R
where
    R: Send + 'static,
    F: FnOnce() -> R + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(f());
    });
    rx.recv_timeout(timeout)
        .unwrap_or_else(|_| panic!("operation did not complete within {:?}", timeout))
}

/// Spin until `condition` holds, failing the test after [`COMPLETES_WITHIN`]
pub(super) fn eventually(mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + COMPLETES_WITHIN;
    while !condition() {
        assert!(Instant::now() < deadline, "condition never became true");
        thread::yield_now();
    }
}
