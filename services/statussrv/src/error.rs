//! Error taxonomy for statussrv
//!
//! Two layers of errors: `StoreError` classifies what the database layer can
//! fail with, `ApiError` is everything the domain and HTTP layers can surface.
//! Status codes are chosen in exactly one place, the `IntoResponse` impl.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Failures from the data-access layer.
///
/// `NotFound` is a distinguishable outcome so callers can decide whether a
/// missing row is an error (GET) or a no-op (idempotent DELETE/PATCH).
/// Anything else is wrapped as `Unknown`; raw sqlx errors never cross this
/// boundary unwrapped.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: i64 },

    #[error("{context}: {source}")]
    Unknown {
        context: String,
        #[source]
        source: sqlx::Error,
    },
}

impl StoreError {
    pub fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound { resource, id }
    }

    pub fn unknown(context: impl Into<String>, source: sqlx::Error) -> Self {
        Self::Unknown {
            context: context.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors surfaced by the domain and HTTP layers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Payload failed schema validation. Carries the validator detail,
    /// which is safe to return to the client.
    #[error("invalid payload: {0}")]
    Validation(String),

    /// Path id segment is not a valid integer.
    #[error("Invalid {0} ID")]
    InvalidId(&'static str),

    /// Missing or rejected bearer token.
    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    /// A persisted record no longer satisfies its read schema.
    #[error("corrupted {0} data in database")]
    Corrupted(&'static str),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(_) | ApiError::InvalidId(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            },
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            // Store and corruption detail goes to the log sink only, never
            // to the client.
            ApiError::Corrupted(_) | ApiError::Store(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::not_found("incident", 42);
        assert_eq!(err.to_string(), "incident not found: 42");
        assert!(err.is_not_found());

        let err = StoreError::unknown("failed to list incidents", sqlx::Error::PoolClosed);
        assert!(err.to_string().starts_with("failed to list incidents"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_status_code_mapping() {
        let cases = [
            (
                ApiError::Validation("bad".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::InvalidId("incident"), StatusCode::BAD_REQUEST),
            (
                ApiError::Unauthorized("Missing API token"),
                StatusCode::UNAUTHORIZED,
            ),
            (ApiError::NotFound("alert"), StatusCode::NOT_FOUND),
            (
                ApiError::Corrupted("incident"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::Store(StoreError::unknown("query failed", sqlx::Error::PoolClosed)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_internal_detail_not_leaked() {
        let err = ApiError::Store(StoreError::unknown(
            "connection refused at 10.0.0.5",
            sqlx::Error::PoolClosed,
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
