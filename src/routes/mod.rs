//! HTTP route handlers.
//!
//! Two static routes: the greeting at `/` and the liveness probe at `/health`.
//! Anything else falls through to axum's default 404 / 405 responses.
//!
//! Every response, including the fallbacks, carries an `x-request-id` header
//! matching the id in that request's log lines.

pub mod health;
pub mod root;

use axum::{middleware, routing::get, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_HEALTH;
use crate::middleware::{access_log, propagate_request_id, set_request_id};

/// Creates the Axum router with both routes.
pub fn create_router() -> Router {
    let root_routes = Router::new().route("/", get(root::root));

    // Health check - no caching, always fresh for liveness probes
    let health_routes = Router::new().route("/health", get(health::health)).layer(
        SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_HEALTH),
        ),
    );

    Router::new()
        .merge(root_routes)
        .merge(health_routes)
        // Outermost first: assign the id, echo it back, then log inside its span
        .layer(
            ServiceBuilder::new()
                .layer(set_request_id())
                .layer(propagate_request_id())
                .layer(middleware::from_fn(access_log)),
        )
}
