//! Synchronization utilities for robust mutex handling
//!
//! This module provides utilities for handling mutex poisoning in a
//! consistent manner across the codebase.

use std::sync::{LockResult, PoisonError};

/// Recover the guard from a possibly poisoned lock or condvar wait
///
/// A lock is poisoned when a thread panics while holding it. For the queue
/// this can only happen inside a user `Hash` or `Eq` implementation, which
/// may run after part of an operation has already been applied. The state
/// can therefore be partially updated (an item popped from the sequence but
/// not yet moved to processing, for example) and that item may be lost.
/// The guard is still handed back so other producers and consumers keep
/// running instead of panicking in turn.
///
/// # Arguments
/// * `result` - The result from a lock or condvar wait operation
/// * `context` - Name of the lock owner, used in the warning log line
///
/// # Examples
/// ```
/// use std::sync::Mutex;
/// use workqueue::core::sync::recover_poison;
///
/// let mutex = Mutex::new(42);
/// let guard = recover_poison(mutex.lock(), "example");
/// assert_eq!(*guard, 42);
/// ```
pub fn recover_poison<G>(result: LockResult<G>, context: &str) -> G {
    result.unwrap_or_else(|poison_err: PoisonError<G>| {
        log::warn!(
            "Internal synchronisation error in '{}' (mutex poisoned). A panic occurred while holding the lock; continuing with recovered state",
            context
        );
        poison_err.into_inner()
    })
}
