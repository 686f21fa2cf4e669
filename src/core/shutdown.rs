//! Process-level shutdown coordination
//!
//! Turns OS signals (Ctrl-C, SIGTERM, ...) into a broadcast notification and a
//! sticky flag, so blocking work such as queue consumers can be told to stop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Coordinates graceful shutdown across the application
#[derive(Clone)]
pub struct ShutdownCoordinator {
    shutdown_tx: broadcast::Sender<()>,
    shutdown_requested: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    pub fn new() -> (Self, broadcast::Receiver<()>) {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(8);
        let coordinator = Self {
            shutdown_tx,
            shutdown_requested: Arc::new(AtomicBool::new(false)),
        };
        (coordinator, shutdown_rx)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown_requested.store(true, Ordering::Release);
        let _ = self.shutdown_tx.send(());
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::Acquire)
    }

    /// Install signal handlers that trigger this coordinator
    ///
    /// The first signal requests a graceful shutdown; a second one exits the
    /// process immediately with status 130. Must be called from within a
    /// tokio runtime.
    pub fn install_signal_handlers(&self) {
        setup_signal_handlers(self.shutdown_tx.clone(), self.shutdown_requested.clone());
    }
}

fn setup_signal_handlers(shutdown_tx: broadcast::Sender<()>, shutdown_requested: Arc<AtomicBool>) {
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }

        use std::sync::atomic::AtomicUsize;
        use tokio::signal::unix::{signal, SignalKind};
        let signal_count = Arc::new(AtomicUsize::new(0));
        let signals = [
            SignalKind::interrupt(),
            SignalKind::terminate(),
            SignalKind::hangup(),
            SignalKind::quit(),
        ];

        for kind in signals {
            let tx = shutdown_tx.clone();
            let requested = shutdown_requested.clone();
            let sig_ctr = signal_count.clone();

            tokio::spawn(async move {
                if let Ok(mut sig) = signal(kind) {
                    while sig.recv().await.is_some() {
                        let prev = sig_ctr.fetch_add(1, Ordering::AcqRel);
                        requested.store(true, Ordering::Release);
                        let _ = tx.send(());
                        if prev >= 1 {
                            log::warn!("Second shutdown signal received; exiting");
                            std::process::exit(130);
                        }
                        log::info!("Shutdown signal received; stopping producers and consumers");
                    }
                }
            });
        }
    }

    #[cfg(not(unix))]
    {
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                shutdown_requested.store(true, Ordering::Release);
                let _ = shutdown_tx.send(());
            }
        });
    }
}
