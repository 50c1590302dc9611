//! Static bearer token middleware
//!
//! Layered over the /api/v1 subtree. In dev mode the layer is not
//! installed at all; see `routes::create_router`.

use axum::{
    body::Body,
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::AppState;

/// Reject the request unless the Authorization header carries the
/// configured token as `Bearer <token>`.
pub async fn require_bearer(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(header_value) = request.headers().get(header::AUTHORIZATION) else {
        return Err(ApiError::Unauthorized("Missing API token"));
    };

    let Ok(header_str) = header_value.to_str() else {
        return Err(ApiError::Unauthorized("Invalid API token"));
    };

    let token = header_str.split_once(' ').map(|(_, token)| token);

    if token != Some(state.config.api_token.as_str()) {
        return Err(ApiError::Unauthorized("Invalid API token"));
    }

    Ok(next.run(request).await)
}
