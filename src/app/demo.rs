//! Producer/consumer demonstration
//!
//! Producers offer numbered elements to a shared queue and one of them shuts
//! the queue down part way through; consumers print each element until they
//! observe the terminal signal. Queue work is blocking, so producers and
//! consumers run on tokio's blocking pool while signal handling stays on the
//! async side.

use crate::app::cli::DemoSettings;
use crate::app::error::{AppError, AppResult};
use crate::core::shutdown::ShutdownCoordinator;
use crate::queue::api::{WorkQueue, Worker, WorkerReport};
use std::collections::HashSet;
use std::convert::Infallible;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use tokio::task::JoinHandle;

/// Payload pushed through the queue
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Element {
    pub index: u64,
    pub name: String,
}

impl Element {
    pub fn new(index: u64) -> Self {
        Self {
            index,
            name: format!("Hi Im index {}", index),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Outcome of a demonstration run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport {
    /// One report per consumer, in consumer order
    pub workers: Vec<WorkerReport>,
    /// Adds issued by producers, including ones the queue discarded
    pub offered: usize,
    /// Elements re-added while they were being processed
    pub readds: usize,
    pub drained: bool,
}

impl DemoReport {
    pub fn delivered(&self) -> usize {
        self.workers.iter().map(WorkerReport::total).sum()
    }
}

/// Shared state for consumers
struct ConsumerContext {
    queue: Arc<WorkQueue<Element>>,
    settings: DemoSettings,
    readded: Mutex<HashSet<u64>>,
    readds: AtomicUsize,
}

impl ConsumerContext {
    fn handle(&self, element: &Element) {
        println!(
            "Element : {} , does queue has been shutdown ? {}",
            element, false
        );

        if let Some(every) = self.settings.readd_every {
            if element.index % every as u64 == 0 && self.mark_readded(element.index) {
                log::debug!("re-adding {} while it is being processed", element);
                self.queue.add(element.clone());
                self.readds.fetch_add(1, Ordering::Relaxed);
            }
        }

        if !self.settings.process_delay.is_zero() {
            thread::sleep(self.settings.process_delay);
        }
    }

    // Each element is re-added at most once, or a drain would never finish
    fn mark_readded(&self, index: u64) -> bool {
        let mut readded = crate::core::sync::recover_poison(self.readded.lock(), "readded");
        readded.insert(index)
    }
}

/// Run the demonstration to completion
///
/// Returns once every consumer has observed the terminal signal. A signal
/// delivered to `shutdown` shuts the queue down without drain.
pub async fn run(settings: DemoSettings, shutdown: ShutdownCoordinator) -> AppResult<DemoReport> {
    let queue = Arc::new(WorkQueue::named("elements"));
    log::info!(
        "Starting demo: {} producer(s), {} consumer(s), {} element(s), shutdown at {}, drain {}",
        settings.producers,
        settings.consumers,
        settings.items,
        settings
            .shutdown_at
            .map_or_else(|| "end".to_string(), |i| i.to_string()),
        settings.drain
    );

    let signal_bridge = {
        let queue = Arc::clone(&queue);
        let mut shutdown_rx = shutdown.subscribe();
        tokio::spawn(async move {
            if shutdown_rx.recv().await.is_ok() {
                log::warn!("Interrupted; shutting the queue down");
                queue.shut_down();
            }
        })
    };

    let context = Arc::new(ConsumerContext {
        queue: Arc::clone(&queue),
        settings: settings.clone(),
        readded: Mutex::new(HashSet::new()),
        readds: AtomicUsize::new(0),
    });

    let consumers: Vec<(String, JoinHandle<WorkerReport>)> = (0..settings.consumers)
        .map(|id| {
            let name = format!("consumer-{}", id);
            let context = Arc::clone(&context);
            let worker = Worker::new(name.clone(), Arc::clone(&queue));
            let handle = tokio::task::spawn_blocking(move || {
                if !context.settings.consumer_delay.is_zero() {
                    thread::sleep(context.settings.consumer_delay);
                }
                let report = worker.run(|element: &Element| {
                    context.handle(element);
                    Ok::<(), Infallible>(())
                });
                println!("Element :  , does queue has been shutdown ? {}", true);
                log::debug!(
                    "{} stopped after {} element(s)",
                    worker.name(),
                    report.total()
                );
                report
            });
            (name, handle)
        })
        .collect();

    let offered = Arc::new(AtomicUsize::new(0));
    let producers: Vec<(String, JoinHandle<()>)> = (0..settings.producers)
        .map(|id| {
            let name = format!("producer-{}", id);
            let queue = Arc::clone(&queue);
            let offered = Arc::clone(&offered);
            let settings = settings.clone();
            let handle = tokio::task::spawn_blocking(move || {
                produce(id, &queue, &settings, &offered);
            });
            (name, handle)
        })
        .collect();

    for (name, handle) in producers {
        handle.await.map_err(|e| AppError::Task {
            task: name,
            message: e.to_string(),
        })?;
    }

    // Nobody reached the shutdown index; stop once everything was offered
    if !queue.shutting_down() {
        let queue = Arc::clone(&queue);
        let drain = settings.drain;
        tokio::task::spawn_blocking(move || initiate_shutdown(&queue, drain))
            .await
            .map_err(|e| AppError::Task {
                task: "shutdown".to_string(),
                message: e.to_string(),
            })?;
    }

    let mut workers = Vec::with_capacity(consumers.len());
    for (name, handle) in consumers {
        let report = handle.await.map_err(|e| AppError::Task {
            task: name,
            message: e.to_string(),
        })?;
        workers.push(report);
    }

    signal_bridge.abort();

    let report = DemoReport {
        workers,
        offered: offered.load(Ordering::Relaxed),
        readds: context.readds.load(Ordering::Relaxed),
        drained: settings.drain && !shutdown.is_shutdown_requested(),
    };
    log::info!(
        "Demo finished: {} offered, {} delivered, {} re-added",
        report.offered,
        report.delivered(),
        report.readds
    );
    Ok(report)
}

// Producer `id` offers indices id, id + P, id + 2P, ...
fn produce(id: usize, queue: &WorkQueue<Element>, settings: &DemoSettings, offered: &AtomicUsize) {
    if !settings.producer_delay.is_zero() {
        thread::sleep(settings.producer_delay);
    }

    for index in (id..settings.items).step_by(settings.producers) {
        if settings.shutdown_at == Some(index) {
            log::info!("producer-{} reached element {}; shutting down", id, index);
            initiate_shutdown(queue, settings.drain);
        }
        queue.add(Element::new(index as u64));
        offered.fetch_add(1, Ordering::Relaxed);
    }
    log::debug!("producer-{} finished", id);
}

fn initiate_shutdown(queue: &WorkQueue<Element>, drain: bool) {
    if drain {
        queue.shut_down_with_drain();
    } else {
        queue.shut_down();
    }
}
