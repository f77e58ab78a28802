// Signal handling module
//
// SIGTERM and SIGINT both trigger a graceful stop: the accept loop exits
// and in-flight connections get a grace period to finish.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Shutdown coordination state
pub struct ShutdownHandler {
    /// Wakes the accept loop when a stop signal arrives
    pub shutdown: Arc<Notify>,
    /// Set before the notify, covers a signal landing between accepts
    pub shutdown_requested: Arc<AtomicBool>,
}

impl ShutdownHandler {
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(Notify::new()),
            shutdown_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::SeqCst)
    }

    fn request(&self) {
        self.shutdown_requested.store(true, Ordering::SeqCst);
        self.shutdown.notify_one();
    }
}

impl Default for ShutdownHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Start signal handlers (Unix)
///
/// Spawns a background task that waits for SIGTERM or SIGINT and flags the
/// shutdown handler.
#[cfg(unix)]
pub fn start_signal_handler(handler: Arc<ShutdownHandler>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut sigterm =
            signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");
        let mut sigint =
            signal(SignalKind::interrupt()).expect("Failed to register SIGINT handler");

        tokio::select! {
            _ = sigterm.recv() => crate::logger::log_shutdown("SIGTERM"),
            _ = sigint.recv() => crate::logger::log_shutdown("SIGINT"),
        }

        handler.request();
    });
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(handler: Arc<ShutdownHandler>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            crate::logger::log_shutdown("Ctrl+C");
            handler.request();
        }
    });
}
