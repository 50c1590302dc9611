//! Service API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::domain::Service;
use crate::error::ApiError;
use crate::AppState;

use super::parse_id;

const RESOURCE: &str = "service";

/// List all services
#[utoipa::path(
    get,
    path = "/api/v1/services",
    responses(
        (status = 200, description = "All stored services", body = [Service]),
        (status = 401, description = "Missing or invalid API token"),
        (status = 500, description = "Server error")
    ),
    tag = "services"
)]
pub async fn list_services(State(state): State<AppState>) -> Result<Json<Vec<Service>>, ApiError> {
    let services = state.services.get_all().await?;
    Ok(Json(services))
}

/// Get one service by id
#[utoipa::path(
    get,
    path = "/api/v1/services/{id}",
    params(("id" = i64, Path, description = "Service id")),
    responses(
        (status = 200, description = "The service", body = Service),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "No service with this id"),
        (status = 500, description = "Server error")
    ),
    tag = "services"
)]
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Service>, ApiError> {
    let id = parse_id(&id, RESOURCE)?;

    match state.services.get(id).await? {
        Some(service) => Ok(Json(service)),
        None => Err(ApiError::NotFound(RESOURCE)),
    }
}

/// Create a service
#[utoipa::path(
    post,
    path = "/api/v1/services",
    request_body = crate::domain::CreateService,
    responses(
        (status = 201, description = "Service created", body = Service),
        (status = 400, description = "Payload failed validation"),
        (status = 500, description = "Server error")
    ),
    tag = "services"
)]
pub async fn create_service(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<Service>), ApiError> {
    let service = state.services.create(payload).await?;
    Ok((StatusCode::CREATED, Json(service)))
}

/// Partially update a service
#[utoipa::path(
    patch,
    path = "/api/v1/services/{id}",
    params(("id" = i64, Path, description = "Service id")),
    request_body = crate::domain::PatchService,
    responses(
        (status = 200, description = "Updated service", body = Service),
        (status = 400, description = "Invalid id or payload"),
        (status = 404, description = "No service with this id"),
        (status = 500, description = "Server error")
    ),
    tag = "services"
)]
pub async fn patch_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<Service>, ApiError> {
    let id = parse_id(&id, RESOURCE)?;

    match state.services.patch(id, payload).await? {
        Some(service) => Ok(Json(service)),
        None => Err(ApiError::NotFound(RESOURCE)),
    }
}

/// Delete a service (idempotent)
#[utoipa::path(
    delete,
    path = "/api/v1/services/{id}",
    params(("id" = i64, Path, description = "Service id")),
    responses(
        (status = 204, description = "Deleted, or already absent"),
        (status = 400, description = "Invalid id"),
        (status = 500, description = "Server error")
    ),
    tag = "services"
)]
pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id, RESOURCE)?;

    state.services.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
