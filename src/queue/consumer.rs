//! Consumer helpers for processing items from a WorkQueue
//!
//! Every successful `get` must be matched by exactly one `done`, including on
//! error paths, or the item stays in the processing set forever and re-adds
//! for it are never delivered. The helpers here make that automatic.

use crate::queue::work_queue::WorkQueue;
use std::fmt::Display;
use std::hash::Hash;
use std::io;
use std::ops::Deref;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// A checked-out item that is marked done when dropped
///
/// Returned by [`WorkQueue::get_guarded`]. Dereferences to the item. The
/// matching `done` runs on drop, so it also happens when the processing code
/// returns early or panics.
pub struct ItemGuard<'q, T>
where
    T: Eq + Hash + Clone,
{
    queue: &'q WorkQueue<T>,
    item: T,
}

impl<T> ItemGuard<'_, T>
where
    T: Eq + Hash + Clone,
{
    pub fn item(&self) -> &T {
        &self.item
    }

    /// Mark the item done now instead of at end of scope
    pub fn finish(self) {
        drop(self);
    }
}

impl<T> Deref for ItemGuard<'_, T>
where
    T: Eq + Hash + Clone,
{
    type Target = T;

    fn deref(&self) -> &T {
        &self.item
    }
}

impl<T> Drop for ItemGuard<'_, T>
where
    T: Eq + Hash + Clone,
{
    fn drop(&mut self) {
        self.queue.done(&self.item);
    }
}

impl<T> WorkQueue<T>
where
    T: Eq + Hash + Clone,
{
    /// Like [`get`](Self::get), but the returned guard calls `done` on drop
    pub fn get_guarded(&self) -> Option<ItemGuard<'_, T>> {
        self.get().map(|item| ItemGuard { queue: self, item })
    }

    /// Check out one item, run `f` on it and mark it done
    ///
    /// Returns `None` on the terminal shutdown signal without calling `f`.
    /// `done` runs even if `f` panics.
    pub fn process_next<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let guard = self.get_guarded()?;
        Some(f(guard.item()))
    }
}

/// Summary of a finished worker loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerReport {
    pub name: String,
    /// Items the handler completed successfully
    pub processed: usize,
    /// Items the handler returned an error for
    pub failed: usize,
}

impl WorkerReport {
    pub fn total(&self) -> usize {
        self.processed + self.failed
    }
}

/// Named consumer loop over a shared queue
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use workqueue::queue::{WorkQueue, Worker};
///
/// let queue = Arc::new(WorkQueue::new());
/// queue.add("job");
/// queue.shut_down();
///
/// let report = Worker::new("worker-0", Arc::clone(&queue))
///     .run(|item: &&str| -> Result<(), String> {
///         println!("processing {}", item);
///         Ok(())
///     });
/// assert_eq!(report.processed, 1);
/// ```
pub struct Worker<T> {
    name: String,
    queue: Arc<WorkQueue<T>>,
}

impl<T> Worker<T>
where
    T: Eq + Hash + Clone,
{
    pub fn new(name: impl Into<String>, queue: Arc<WorkQueue<T>>) -> Self {
        Self {
            name: name.into(),
            queue,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Process items until the queue reports shutdown
    ///
    /// Handler errors are logged and counted; the item is still marked done
    /// and the loop carries on with the next item.
    pub fn run<F, E>(&self, mut handler: F) -> WorkerReport
    where
        F: FnMut(&T) -> Result<(), E>,
        E: Display,
    {
        log::debug!(
            "worker '{}' started on queue '{}'",
            self.name,
            self.queue.name()
        );

        let mut report = WorkerReport {
            name: self.name.clone(),
            processed: 0,
            failed: 0,
        };

        while let Some(result) = self.queue.process_next(&mut handler) {
            match result {
                Ok(()) => report.processed += 1,
                Err(e) => {
                    report.failed += 1;
                    log::warn!("worker '{}': failed to process item: {}", self.name, e);
                }
            }
        }

        log::debug!(
            "worker '{}' observed shutdown after {} items ({} failed)",
            self.name,
            report.total(),
            report.failed
        );
        report
    }
}

impl<T> Worker<T>
where
    T: Eq + Hash + Clone + Send + 'static,
{
    /// Run the loop on a dedicated OS thread named after the worker
    pub fn spawn<F, E>(self, handler: F) -> io::Result<JoinHandle<WorkerReport>>
    where
        F: FnMut(&T) -> Result<(), E> + Send + 'static,
        E: Display,
    {
        thread::Builder::new()
            .name(self.name.clone())
            .spawn(move || self.run(handler))
    }
}
