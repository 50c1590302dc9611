//! API route configuration
//!
//! All resource routes live under /api/v1 behind the bearer-auth layer.
//! /health and the OpenAPI document stay outside it.

use axum::{middleware, routing::get, Router};
use tracing::warn;
use utoipa::OpenApi;

use crate::api::alert_handlers::{
    create_alert, delete_alert, get_alert, list_alerts, patch_alert,
};
use crate::api::incident_handlers::{
    create_incident, delete_incident, get_incident, list_incidents, patch_incident,
};
use crate::api::service_handlers::{
    create_service, delete_service, get_service, list_services, patch_service,
};
use crate::api::{auth, health_check};
use crate::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::incident_handlers::list_incidents,
        crate::api::incident_handlers::get_incident,
        crate::api::incident_handlers::create_incident,
        crate::api::incident_handlers::patch_incident,
        crate::api::incident_handlers::delete_incident,
        crate::api::service_handlers::list_services,
        crate::api::service_handlers::get_service,
        crate::api::service_handlers::create_service,
        crate::api::service_handlers::patch_service,
        crate::api::service_handlers::delete_service,
        crate::api::alert_handlers::list_alerts,
        crate::api::alert_handlers::get_alert,
        crate::api::alert_handlers::create_alert,
        crate::api::alert_handlers::patch_alert,
        crate::api::alert_handlers::delete_alert,
    ),
    components(schemas(
        crate::domain::Incident,
        crate::domain::IncidentStatus,
        crate::domain::CreateIncident,
        crate::domain::PatchIncident,
        crate::domain::Service,
        crate::domain::CreateService,
        crate::domain::PatchService,
        crate::domain::Alert,
        crate::domain::CreateAlert,
        crate::domain::PatchAlert,
    )),
    tags(
        (name = "incidents", description = "Incident tracking"),
        (name = "services", description = "Monitored services"),
        (name = "alerts", description = "Alerts linked to incidents and services")
    ),
    info(title = "statussrv", description = "Status page storage API")
)]
pub struct ApiDoc;

async fn openapi_json() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}

/// Build the full application router.
pub fn create_router(state: AppState) -> Router {
    let resources = Router::new()
        .route("/incidents", get(list_incidents).post(create_incident))
        .route(
            "/incidents/{id}",
            get(get_incident).patch(patch_incident).delete(delete_incident),
        )
        .route("/services", get(list_services).post(create_service))
        .route(
            "/services/{id}",
            get(get_service).patch(patch_service).delete(delete_service),
        )
        .route("/alerts", get(list_alerts).post(create_alert))
        .route(
            "/alerts/{id}",
            get(get_alert).patch(patch_alert).delete(delete_alert),
        );

    let resources = if state.config.dev_mode {
        warn!("dev mode enabled: bearer token auth is disabled");
        resources
    } else {
        resources.layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer,
        ))
    };

    Router::new()
        .route("/health", get(health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api/v1", resources)
        .with_state(state)
}
