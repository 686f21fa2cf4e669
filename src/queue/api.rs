//! Public API for the queue system
//!
//! External modules should import from here rather than directly from internal
//! modules. See the module documentation for usage examples.

// Core queue
pub use crate::queue::work_queue::{WorkQueue, DEFAULT_QUEUE_NAME};

// Consumer helpers
pub use crate::queue::consumer::{ItemGuard, Worker, WorkerReport};

// Monitoring
pub use crate::queue::types::QueueStats;
