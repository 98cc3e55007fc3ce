//! Shutdown coordination
//!
//! A broadcast channel plus a sticky flag. Signal handlers trigger it; the
//! polling task listens on a receiver and stops at the next select.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Exit status used when a second signal forces termination
pub const FORCED_EXIT_CODE: i32 = 130;

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
        // Release pairs with the Acquire in is_shutdown_requested
        self.shutdown_requested.store(true, Ordering::Release);
        let _ = self.shutdown_tx.send(());
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::Acquire)
    }

    /// Spawn signal listeners on the current runtime.
    ///
    /// The first SIGINT/SIGTERM/SIGHUP/SIGQUIT (or Ctrl-C) requests a graceful
    /// shutdown; a second one exits immediately with status 130.
    pub fn listen_for_signals(&self) {
        let signal_count = Arc::new(AtomicUsize::new(0));

        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            // SIGPIPE is left ignored: a closed stdout must surface as a write error
            for kind in [
                SignalKind::interrupt(),
                SignalKind::terminate(),
                SignalKind::hangup(),
                SignalKind::quit(),
            ] {
                let coordinator = self.clone();
                let counter = signal_count.clone();
                tokio::spawn(async move {
                    if let Ok(mut sig) = signal(kind) {
                        while sig.recv().await.is_some() {
                            coordinator.on_signal(&counter);
                        }
                    }
                });
            }
        }

        #[cfg(not(unix))]
        {
            let coordinator = self.clone();
            tokio::spawn(async move {
                while tokio::signal::ctrl_c().await.is_ok() {
                    coordinator.on_signal(&signal_count);
                }
            });
        }
    }

    fn on_signal(&self, counter: &AtomicUsize) {
        let previous = counter.fetch_add(1, Ordering::AcqRel);
        if previous >= 1 {
            log::warn!("Second signal received; exiting");
            std::process::exit(FORCED_EXIT_CODE);
        }
        log::info!("Shutdown requested; stopping after the current frame");
        self.trigger_shutdown();
    }
}
