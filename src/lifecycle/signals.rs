//! OS signal handling.
//!
//! # Responsibilities
//! - Wait for SIGTERM/SIGINT
//! - Translate the first one into a graceful shutdown
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - In-flight mounts finish; new connections are refused

use tokio::signal::unix::{signal, SignalKind};

use crate::lifecycle::shutdown::Shutdown;

/// Resolve once SIGINT or SIGTERM is received.
pub async fn wait_for_signal() -> std::io::Result<()> {
    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result?,
        _ = terminate.recv() => {}
    }
    Ok(())
}

/// Spawn a task that triggers `shutdown` on the first termination signal.
pub fn spawn_signal_listener(shutdown: Shutdown) {
    tokio::spawn(async move {
        match wait_for_signal().await {
            Ok(()) => tracing::info!("Shutdown signal received"),
            Err(e) => tracing::error!(error = %e, "Failed to install signal handlers, shutting down"),
        }
        shutdown.trigger();
    });
}
