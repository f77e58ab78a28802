// Server module entry point
// Accept loop, connection handling and graceful shutdown

pub mod connection;
pub mod listener;
pub mod shutdown;

// Re-export commonly used types
pub use listener::create_listener;
pub use shutdown::{start_signal_handler, ShutdownHandler};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::config::AppState;
use crate::logger;

/// How long in-flight connections get to finish after a stop signal
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Accept connections until a shutdown signal arrives, then drain
pub async fn run(listener: TcpListener, state: Arc<AppState>, shutdown: Arc<ShutdownHandler>) {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        // Covers a signal that landed while the loop was not awaiting
        if shutdown.is_requested() {
            break;
        }

        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::accept_connection(
                            stream,
                            peer_addr,
                            &state,
                            &active_connections,
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.shutdown.notified() => {
                break;
            }
        }
    }

    // Stop accepting before waiting out in-flight requests
    drop(listener);
    drain_connections(&active_connections).await;
}

/// Wait for active connections to finish, bounded by the grace period
async fn drain_connections(active: &Arc<AtomicUsize>) {
    let deadline = tokio::time::Instant::now() + SHUTDOWN_GRACE;

    loop {
        let remaining = active.load(Ordering::SeqCst);
        if remaining == 0 {
            break;
        }
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Shutdown grace period expired with {remaining} connections still active"
            ));
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}
