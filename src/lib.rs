//! ec2-greeter: a minimal greeting web service.
//!
//! Serves a fixed greeting at `/` and a liveness probe at `/health` on the
//! port named by the `PORT` environment variable.

pub mod config;
pub mod http;
pub mod logging;
pub mod middleware;
pub mod routes;

pub use config::{AppConfig, ConfigError};
pub use http::ServerError;
pub use routes::create_router;
