//! Type definitions shared across the queue system

/// Point-in-time view of the queue bookkeeping
///
/// Taken under the queue lock, so the counts are consistent with each other,
/// but they are stale as soon as the lock is released. Intended for
/// monitoring and log output only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueueStats {
    /// Items in the sequence waiting for a `get`
    pub queued: usize,
    /// Items needing processing (queued plus pending re-adds)
    pub dirty: usize,
    /// Items checked out by consumers
    pub processing: usize,
    /// Whether shutdown has been requested
    pub shutting_down: bool,
    /// Whether a drain is in effect
    pub draining: bool,
}

impl QueueStats {
    /// Re-adds waiting for their in-flight copy to be marked done
    pub fn pending_readds(&self) -> usize {
        self.dirty.saturating_sub(self.queued)
    }
}
