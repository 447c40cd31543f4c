//! HTTP server startup logic.

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::AppConfig;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Start the HTTP server based on configuration.
///
/// This function blocks until the server shuts down on SIGTERM/SIGINT.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let listener = bind(config).await?;
    serve(listener, app, shutdown::shutdown_signal()).await
}

/// Bind a listener on the configured host and port.
pub async fn bind(config: &AppConfig) -> Result<TcpListener, ServerError> {
    let addr = config.http.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    tracing::info!(%addr, "Listening for HTTP connections");
    Ok(listener)
}

/// Serve `app` on an already-bound listener until `shutdown` resolves.
///
/// In-flight requests are drained before this returns.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("Server stopped");
    Ok(())
}
