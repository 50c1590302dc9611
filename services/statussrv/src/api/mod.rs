//! HTTP layer: handlers, routes and auth middleware
//!
//! Handlers parse path ids, hand raw JSON bodies to the domain layer and
//! translate outcomes into status codes. No business logic lives here.

pub mod alert_handlers;
pub mod auth;
pub mod incident_handlers;
pub mod routes;
pub mod service_handlers;

pub use routes::create_router;

use crate::error::ApiError;

/// Parse a path id segment. Rejected before the domain layer is reached.
fn parse_id(raw: &str, resource: &'static str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidId(resource))
}

/// Liveness probe, outside the authenticated API surface.
pub async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42", "incident").unwrap(), 42);
        assert!(parse_id("abc", "incident").is_err());
        assert!(parse_id("4.2", "incident").is_err());
        assert!(parse_id("", "incident").is_err());
    }
}
