// Signal handling module
//
// SIGINT and SIGTERM stop the accept loop so the process exits with status 0.
// There is no connection draining.

use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Register signal handlers and notify `shutdown` on the first one received
///
/// Must be called from inside a Tokio runtime.
#[cfg(unix)]
pub fn start_signal_handler(shutdown: Arc<Notify>) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => logger::log_info("SIGTERM received"),
            _ = sigint.recv() => logger::log_info("SIGINT received"),
        }
        shutdown.notify_one();
    });

    Ok(())
}

/// Non-Unix fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Arc<Notify>) -> std::io::Result<()> {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            logger::log_info("Ctrl+C received");
            shutdown.notify_one();
        }
    });

    Ok(())
}
