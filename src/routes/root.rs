//! Greeting endpoint.

use crate::config::GREETING;

/// Root handler.
///
/// Returns the fixed greeting as `text/plain` with the default 200 status.
pub async fn root() -> &'static str {
    GREETING
}
