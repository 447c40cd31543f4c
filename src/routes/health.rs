//! Health check endpoint for container orchestration.
//!
//! Provides a simple liveness probe that returns 200 OK when the process is running.
//! Used by ECS, load balancer target groups, and systemd to verify the service is alive.

use axum::http::StatusCode;

use crate::config::HEALTH_OK;

/// Health check handler.
///
/// This is a liveness probe - it only checks that the process can respond to HTTP.
pub async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, HEALTH_OK)
}
