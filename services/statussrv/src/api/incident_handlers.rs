//! Incident API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::domain::Incident;
use crate::error::ApiError;
use crate::AppState;

use super::parse_id;

const RESOURCE: &str = "incident";

/// List all incidents
#[utoipa::path(
    get,
    path = "/api/v1/incidents",
    responses(
        (status = 200, description = "All stored incidents", body = [Incident]),
        (status = 401, description = "Missing or invalid API token"),
        (status = 500, description = "Server error")
    ),
    tag = "incidents"
)]
pub async fn list_incidents(State(state): State<AppState>) -> Result<Json<Vec<Incident>>, ApiError> {
    let incidents = state.incidents.get_all().await?;
    Ok(Json(incidents))
}

/// Get one incident by id
#[utoipa::path(
    get,
    path = "/api/v1/incidents/{id}",
    params(("id" = i64, Path, description = "Incident id")),
    responses(
        (status = 200, description = "The incident", body = Incident),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "No incident with this id"),
        (status = 500, description = "Server error")
    ),
    tag = "incidents"
)]
pub async fn get_incident(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Incident>, ApiError> {
    let id = parse_id(&id, RESOURCE)?;

    match state.incidents.get(id).await? {
        Some(incident) => Ok(Json(incident)),
        None => Err(ApiError::NotFound(RESOURCE)),
    }
}

/// Create an incident
#[utoipa::path(
    post,
    path = "/api/v1/incidents",
    request_body = crate::domain::CreateIncident,
    responses(
        (status = 201, description = "Incident created", body = Incident),
        (status = 400, description = "Payload failed validation"),
        (status = 500, description = "Server error")
    ),
    tag = "incidents"
)]
pub async fn create_incident(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<Incident>), ApiError> {
    let incident = state.incidents.create(payload).await?;
    Ok((StatusCode::CREATED, Json(incident)))
}

/// Partially update an incident
#[utoipa::path(
    patch,
    path = "/api/v1/incidents/{id}",
    params(("id" = i64, Path, description = "Incident id")),
    request_body = crate::domain::PatchIncident,
    responses(
        (status = 200, description = "Updated incident", body = Incident),
        (status = 400, description = "Invalid id or payload"),
        (status = 404, description = "No incident with this id"),
        (status = 500, description = "Server error")
    ),
    tag = "incidents"
)]
pub async fn patch_incident(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<Incident>, ApiError> {
    let id = parse_id(&id, RESOURCE)?;

    match state.incidents.patch(id, payload).await? {
        Some(incident) => Ok(Json(incident)),
        None => Err(ApiError::NotFound(RESOURCE)),
    }
}

/// Delete an incident (idempotent)
#[utoipa::path(
    delete,
    path = "/api/v1/incidents/{id}",
    params(("id" = i64, Path, description = "Incident id")),
    responses(
        (status = 204, description = "Deleted, or already absent"),
        (status = 400, description = "Invalid id"),
        (status = 500, description = "Server error")
    ),
    tag = "incidents"
)]
pub async fn delete_incident(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id, RESOURCE)?;

    state.incidents.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
