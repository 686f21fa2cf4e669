//! Internal queue state with dirty/processing set bookkeeping
//!
//! This module holds the three collections behind the work queue:
//! - The FIFO sequence of items waiting for their first `get`
//! - The dirty set of items that need processing (queued or re-added in flight)
//! - The processing set of items checked out by a consumer
//!
//! Nothing here locks or blocks. `WorkQueue` owns a `QueueState` behind a
//! mutex and uses the returned outcomes to decide which waiters to wake.

use crate::queue::types::QueueStats;
use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

/// Result of offering an item to the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AddOutcome {
    /// Appended to the tail of the sequence; one consumer should be woken
    Queued,
    /// Item is in flight; marked dirty so `done` re-queues it
    Deferred,
    /// Already dirty; collapsed into the pending unit of work
    Duplicate,
    /// Queue is shutting down and the item is not eligible
    Rejected,
}

/// Result of marking an item as processed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DoneOutcome {
    /// Item was re-added while in flight and is back on the sequence
    Requeued,
    /// Item left the processing set with nothing pending
    Finished,
    /// Item was not checked out; nothing changed
    NotProcessing,
}

/// Sequence plus dirty and processing sets, with the shutdown flags
#[derive(Debug)]
pub(crate) struct QueueState<T> {
    queue: VecDeque<T>,
    dirty: HashSet<T>,
    processing: HashSet<T>,
    /// In-flight items that are also dirty; each one re-enters the sequence
    /// on its `done`
    pending_retries: usize,
    shutting_down: bool,
    drain: bool,
}

impl<T> QueueState<T>
where
    T: Eq + Hash + Clone,
{
    pub(crate) fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            dirty: HashSet::new(),
            processing: HashSet::new(),
            pending_retries: 0,
            shutting_down: false,
            drain: false,
        }
    }

    /// Mark an item as needing processing
    pub(crate) fn add(&mut self, item: T) -> AddOutcome {
        // While draining only re-adds of in-flight items are honoured
        if self.shutting_down && !(self.drain && self.processing.contains(&item)) {
            return AddOutcome::Rejected;
        }

        if self.dirty.contains(&item) {
            return AddOutcome::Duplicate;
        }

        if self.processing.contains(&item) {
            self.dirty.insert(item);
            self.pending_retries += 1;
            return AddOutcome::Deferred;
        }

        self.dirty.insert(item.clone());
        self.queue.push_back(item);
        AddOutcome::Queued
    }

    /// Check out the head of the sequence, moving it from dirty to processing
    pub(crate) fn pop(&mut self) -> Option<T> {
        let item = self.queue.pop_front()?;
        self.dirty.remove(&item);
        self.processing.insert(item.clone());
        Some(item)
    }

    /// Release a checked-out item, re-queueing it if it went dirty meanwhile
    pub(crate) fn done(&mut self, item: &T) -> DoneOutcome {
        if !self.processing.remove(item) {
            return DoneOutcome::NotProcessing;
        }

        if self.dirty.contains(item) {
            self.pending_retries = self.pending_retries.saturating_sub(1);
            self.queue.push_back(item.clone());
            DoneOutcome::Requeued
        } else {
            DoneOutcome::Finished
        }
    }

    /// Flip the shutdown flag. Returns true for the first shutdown request.
    ///
    /// A plain shutdown always disables drain. A drain request only enables
    /// drain when it is the first shutdown request.
    pub(crate) fn shut_down(&mut self, drain: bool) -> bool {
        let first = !self.shutting_down;
        if !drain {
            self.drain = false;
        } else if first {
            self.drain = true;
        }
        self.shutting_down = true;
        first
    }

    /// True once consumers must be handed the terminal signal
    ///
    /// Never true while a retry is pending, since its `done` puts the item
    /// back on the sequence. While draining, any in-flight item holds it back.
    pub(crate) fn is_terminal(&self) -> bool {
        self.shutting_down
            && self.queue.is_empty()
            && self.pending_retries == 0
            && !(self.drain && !self.processing.is_empty())
    }

    /// True while a drain is in progress and work remains
    pub(crate) fn drain_pending(&self) -> bool {
        self.drain && !(self.queue.is_empty() && self.processing.is_empty())
    }

    pub(crate) fn len(&self) -> usize {
        self.queue.len()
    }

    pub(crate) fn shutting_down(&self) -> bool {
        self.shutting_down
    }

    pub(crate) fn stats(&self) -> QueueStats {
        QueueStats {
            queued: self.queue.len(),
            dirty: self.dirty.len(),
            processing: self.processing.len(),
            shutting_down: self.shutting_down,
            draining: self.drain,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_dirty(&self, item: &T) -> bool {
        self.dirty.contains(item)
    }

    #[cfg(test)]
    pub(crate) fn is_processing(&self, item: &T) -> bool {
        self.processing.contains(item)
    }

    #[cfg(test)]
    pub(crate) fn queued(&self) -> Vec<T> {
        self.queue.iter().cloned().collect()
    }
}
