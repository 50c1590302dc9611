//! Alert API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::domain::Alert;
use crate::error::ApiError;
use crate::AppState;

use super::parse_id;

const RESOURCE: &str = "alert";

/// List all alerts
#[utoipa::path(
    get,
    path = "/api/v1/alerts",
    responses(
        (status = 200, description = "All stored alerts", body = [Alert]),
        (status = 401, description = "Missing or invalid API token"),
        (status = 500, description = "Server error")
    ),
    tag = "alerts"
)]
pub async fn list_alerts(State(state): State<AppState>) -> Result<Json<Vec<Alert>>, ApiError> {
    let alerts = state.alerts.get_all().await?;
    Ok(Json(alerts))
}

/// Get one alert by id
#[utoipa::path(
    get,
    path = "/api/v1/alerts/{id}",
    params(("id" = i64, Path, description = "Alert id")),
    responses(
        (status = 200, description = "The alert", body = Alert),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "No alert with this id"),
        (status = 500, description = "Server error")
    ),
    tag = "alerts"
)]
pub async fn get_alert(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Alert>, ApiError> {
    let id = parse_id(&id, RESOURCE)?;

    match state.alerts.get(id).await? {
        Some(alert) => Ok(Json(alert)),
        None => Err(ApiError::NotFound(RESOURCE)),
    }
}

/// Create an alert
#[utoipa::path(
    post,
    path = "/api/v1/alerts",
    request_body = crate::domain::CreateAlert,
    responses(
        (status = 201, description = "Alert created", body = Alert),
        (status = 400, description = "Payload failed validation"),
        (status = 500, description = "Server error")
    ),
    tag = "alerts"
)]
pub async fn create_alert(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<Alert>), ApiError> {
    let alert = state.alerts.create(payload).await?;
    Ok((StatusCode::CREATED, Json(alert)))
}

/// Partially update an alert
#[utoipa::path(
    patch,
    path = "/api/v1/alerts/{id}",
    params(("id" = i64, Path, description = "Alert id")),
    request_body = crate::domain::PatchAlert,
    responses(
        (status = 200, description = "Updated alert", body = Alert),
        (status = 400, description = "Invalid id or payload"),
        (status = 404, description = "No alert with this id"),
        (status = 500, description = "Server error")
    ),
    tag = "alerts"
)]
pub async fn patch_alert(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<Alert>, ApiError> {
    let id = parse_id(&id, RESOURCE)?;

    match state.alerts.patch(id, payload).await? {
        Some(alert) => Ok(Json(alert)),
        None => Err(ApiError::NotFound(RESOURCE)),
    }
}

/// Delete an alert (idempotent)
#[utoipa::path(
    delete,
    path = "/api/v1/alerts/{id}",
    params(("id" = i64, Path, description = "Alert id")),
    responses(
        (status = 204, description = "Deleted, or already absent"),
        (status = 400, description = "Invalid id"),
        (status = 500, description = "Server error")
    ),
    tag = "alerts"
)]
pub async fn delete_alert(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id, RESOURCE)?;

    state.alerts.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
