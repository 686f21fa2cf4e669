//! WorkQueue - fair, stingy, shutdown-aware queue
//!
//! All bookkeeping lives in a single `QueueState` behind one mutex. Consumers
//! blocked in `get` wait on the `available` condvar; a caller blocked in
//! `shut_down_with_drain` waits on the separate `drained` condvar so that a
//! notify-one for new work is never absorbed by the drain waiter.

use crate::core::sync::recover_poison;
use crate::queue::internal::{AddOutcome, DoneOutcome, QueueState};
use crate::queue::types::QueueStats;
use std::fmt;
use std::hash::Hash;
use std::sync::{Condvar, Mutex, MutexGuard};

/// Name used by [`WorkQueue::new`]
pub const DEFAULT_QUEUE_NAME: &str = "default";

/// Multi-producer, multi-consumer work queue
///
/// The queue guarantees that:
/// - Items are handed out in the order they became eligible (fair)
/// - An item that is queued or in flight is never duplicated (stingy)
/// - An item added while in flight is processed exactly once more after `done`
/// - Shutdown is observed by every consumer and wakes all blocked `get` calls
///
/// Share it between threads with `Arc<WorkQueue<T>>`.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use std::thread;
/// use workqueue::queue::WorkQueue;
///
/// let queue = Arc::new(WorkQueue::new());
/// queue.add(1);
/// queue.add(1);
/// queue.add(2);
/// queue.shut_down();
///
/// let consumer = {
///     let queue = Arc::clone(&queue);
///     thread::spawn(move || {
///         let mut seen = Vec::new();
///         while let Some(item) = queue.get() {
///             seen.push(item);
///             queue.done(&item);
///         }
///         seen
///     })
/// };
///
/// assert_eq!(consumer.join().unwrap(), vec![1, 2]);
/// ```
pub struct WorkQueue<T> {
    name: String,
    state: Mutex<QueueState<T>>,
    available: Condvar,
    drained: Condvar,
}

impl<T> WorkQueue<T>
where
    T: Eq + Hash + Clone,
{
    /// Create an empty queue named "default"
    pub fn new() -> Self {
        Self::named(DEFAULT_QUEUE_NAME)
    }

    /// Create an empty queue with a name used in log output
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(QueueState::new()),
            available: Condvar::new(),
            drained: Condvar::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        recover_poison(self.state.lock(), &self.name)
    }

    /// Mark an item as needing processing
    ///
    /// Adding an item that is already pending is a no-op. Adding an item that
    /// is in flight schedules exactly one more round once its `done` arrives.
    /// After shutdown the item is discarded, unless a drain is in progress and
    /// the item is currently in flight.
    pub fn add(&self, item: T) {
        let (outcome, queued) = {
            let mut state = self.lock();
            let outcome = state.add(item);
            (outcome, state.len())
        };

        match outcome {
            AddOutcome::Queued => {
                log::trace!("queue '{}': item queued ({} ready)", self.name, queued);
                self.available.notify_one();
            }
            AddOutcome::Deferred => {
                log::debug!(
                    "queue '{}': item re-added while processing, retry scheduled",
                    self.name
                );
            }
            AddOutcome::Duplicate => {
                log::trace!("queue '{}': item already pending, add ignored", self.name);
            }
            AddOutcome::Rejected => {
                log::debug!("queue '{}': shutting down, item discarded", self.name);
            }
        }
    }

    /// Block until an item is available and check it out
    ///
    /// Returns `None` once the queue is shut down and has nothing left to hand
    /// out; every later call returns `None` immediately. An in-flight item
    /// re-added before shutdown still counts as work left, so the terminal
    /// `None` waits for its retry. While a drain is in progress the terminal
    /// `None` is withheld until every in-flight item has been marked done,
    /// since an in-flight item may still be re-added.
    ///
    /// Every `Some(item)` must be matched by exactly one `done(&item)`.
    pub fn get(&self) -> Option<T> {
        let mut state = self.lock();
        loop {
            if let Some(item) = state.pop() {
                log::trace!(
                    "queue '{}': item checked out ({} ready)",
                    self.name,
                    state.len()
                );
                return Some(item);
            }
            if state.is_terminal() {
                return None;
            }
            state = recover_poison(self.available.wait(state), &self.name);
        }
    }

    /// Mark a checked-out item as processed
    ///
    /// If the item was re-added while in flight it goes back to the tail of the
    /// queue. Calling this for an item that is not checked out is a no-op.
    pub fn done(&self, item: &T) {
        let (outcome, terminal, drain_finished) = {
            let mut state = self.lock();
            let outcome = state.done(item);
            let drain_finished = state.stats().draining && !state.drain_pending();
            (outcome, state.is_terminal(), drain_finished)
        };

        match outcome {
            DoneOutcome::Requeued => {
                log::debug!("queue '{}': dirty item re-queued after done", self.name);
                self.available.notify_one();
            }
            DoneOutcome::Finished => {
                log::trace!("queue '{}': item done", self.name);
            }
            DoneOutcome::NotProcessing => {
                log::trace!(
                    "queue '{}': done called for an item that is not processing",
                    self.name
                );
                return;
            }
        }

        // Last in-flight item of a drain releases everybody still waiting
        if terminal {
            self.available.notify_all();
        }
        if drain_finished {
            self.drained.notify_all();
        }
    }

    /// Stop accepting work and wake all consumers
    ///
    /// Items already queued are still handed out; consumers receive `None`
    /// once the sequence is empty. Cancels any drain in progress.
    pub fn shut_down(&self) {
        let first = self.lock().shut_down(false);
        if first {
            log::info!("queue '{}': shutting down", self.name);
        }
        self.available.notify_all();
        self.drained.notify_all();
    }

    /// Stop accepting new work and block until existing work is finished
    ///
    /// Queued and in-flight items are still delivered and completed, and
    /// re-adds of in-flight items are still honoured. Returns once both the
    /// sequence and the processing set are empty, or once a plain
    /// [`shut_down`](Self::shut_down) cancels the drain.
    ///
    /// Must not be called from a thread that holds an un-`done` item of this
    /// queue, or it waits for itself.
    pub fn shut_down_with_drain(&self) {
        let mut state = self.lock();
        if state.shut_down(true) {
            let stats = state.stats();
            log::info!(
                "queue '{}': shutting down with drain ({} queued, {} processing)",
                self.name,
                stats.queued,
                stats.processing
            );
        }
        self.available.notify_all();

        while state.drain_pending() {
            state = recover_poison(self.drained.wait(state), &self.name);
        }
        drop(state);

        log::info!("queue '{}': drained", self.name);
    }

    /// Number of items ready to be handed out. Advisory only.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True once either shutdown method has been called. Never reverts.
    pub fn shutting_down(&self) -> bool {
        self.lock().shutting_down()
    }

    /// Snapshot of the queue bookkeeping
    pub fn stats(&self) -> QueueStats {
        self.lock().stats()
    }
}

impl<T> Default for WorkQueue<T>
where
    T: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for WorkQueue<T>
where
    T: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkQueue")
            .field("name", &self.name)
            .field("stats", &self.stats())
            .finish()
    }
}
