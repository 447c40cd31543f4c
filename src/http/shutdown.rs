//! Graceful shutdown and signal handling.

/// Resolves once the process is asked to stop.
///
/// Handed to `axum::serve(..).with_graceful_shutdown`: after it resolves no new
/// connections are accepted and in-flight requests are allowed to finish.
pub async fn shutdown_signal() {
    let signal = wait_for_signal().await;
    tracing::info!(signal, "Shutdown requested, draining connections");
}

#[cfg(unix)]
async fn wait_for_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");
    let mut sigint = signal(SignalKind::interrupt()).expect("Failed to install SIGINT handler");

    tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> &'static str {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    "Ctrl+C"
}
