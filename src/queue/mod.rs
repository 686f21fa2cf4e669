//! Fair, Deduplicating Work Queue
//!
//! A multi-producer, multi-consumer work queue with deduplication of pending
//! items, in-flight tracking and cooperative shutdown.
//!
//! # Overview
//!
//! - **Fair**: items are handed out in the order they were queued
//! - **Stingy**: an item is never processed by two consumers at once, and an
//!   item added several times before it is picked up is processed once
//! - **Re-add while processing**: adding an item that is in flight schedules
//!   exactly one more round, delivered after the current `done`
//! - **Shutdown**: `shut_down` wakes every consumer; `shut_down_with_drain`
//!   lets queued and in-flight work finish before consumers are released
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  Producer A  │     │  Producer B  │     │  Producer C  │
//! └──────┬───────┘     └──────┬───────┘     └──────┬───────┘
//!        │ add                │ add                │ add
//!        ▼                    ▼                    ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                 WorkQueue (Mutex + Condvar)             │
//! │                                                         │
//! │  dirty ──► ┌───┬───┬───┬───┐ ──► processing             │
//! │            │ a │ b │ c │...│        │                   │
//! │            └───┴───┴───┴───┘        │ done (re-queue    │
//! │                ▲                    │  if dirty again)  │
//! │                └────────────────────┘                   │
//! └────────┬───────────────┬───────────────┬────────────────┘
//!          │ get/done      │ get/done      │ get/done
//! ┌────────┴──┐     ┌──────┴────┐     ┌────┴──────┐
//! │Consumer A │     │Consumer B │     │Consumer C │
//! └───────────┘     └───────────┘     └───────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//! use workqueue::queue::WorkQueue;
//!
//! let queue = Arc::new(WorkQueue::named("example"));
//!
//! let consumers: Vec<_> = (0..2)
//!     .map(|_| {
//!         let queue = Arc::clone(&queue);
//!         thread::spawn(move || {
//!             let mut handled = 0;
//!             while let Some(item) = queue.get() {
//!                 handled += 1;
//!                 queue.done(&item);
//!             }
//!             handled
//!         })
//!     })
//!     .collect();
//!
//! for i in 0..10 {
//!     queue.add(i);
//! }
//! queue.shut_down_with_drain();
//!
//! let handled: usize = consumers.into_iter().map(|c| c.join().unwrap()).sum();
//! assert_eq!(handled, 10);
//! ```

pub mod api;
mod consumer;
mod internal;
mod types;
mod work_queue;

pub use consumer::{ItemGuard, Worker, WorkerReport};
pub use types::QueueStats;
pub use work_queue::{WorkQueue, DEFAULT_QUEUE_NAME};

#[cfg(test)]
mod tests;
