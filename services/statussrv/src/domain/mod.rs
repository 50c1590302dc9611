//! Domain/service layer
//!
//! One service per resource. Write paths validate untrusted payloads before
//! the store is touched; read paths re-validate what comes back from the
//! store and refuse to return partially valid data. A missing row on
//! patch/delete is a normal outcome here, not an error, so the HTTP layer
//! can map it to 404/204 without inspecting error kinds.

pub mod alerts;
pub mod incidents;
pub mod services;

pub use alerts::{Alert, Alerts, CreateAlert, PatchAlert};
pub use incidents::{CreateIncident, Incident, IncidentStatus, Incidents, PatchIncident};
pub use services::{CreateService, PatchService, Service, Services};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;

/// Parse an untrusted JSON payload into a typed create/patch model.
///
/// All payload models derive `deny_unknown_fields`, so extra fields are
/// rejected here along with wrong types. Failures are logged at debug
/// level only; they are client mistakes, not server faults.
fn parse_payload<T: DeserializeOwned>(payload: serde_json::Value) -> Result<T, ApiError> {
    serde_json::from_value(payload).map_err(|e| {
        debug!("invalid payload: {e}");
        ApiError::Validation(e.to_string())
    })
}
