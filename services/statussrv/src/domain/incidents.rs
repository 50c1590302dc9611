//! Incident domain service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::error::{ApiError, StoreError};
use crate::store::{IncidentChanges, IncidentRecord, IncidentStore, NewIncident};

use super::parse_payload;

const RESOURCE: &str = "incident";

/// Incident lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    Open,
    Closed,
}

impl IncidentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentStatus::Open => "open",
            IncidentStatus::Closed => "closed",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "open" => Some(IncidentStatus::Open),
            "closed" => Some(IncidentStatus::Closed),
            _ => None,
        }
    }
}

/// Incident as returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub description: Option<String>,
    pub status: IncidentStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateIncident {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: IncidentStatus,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PatchIncident {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<IncidentStatus>,
}

#[derive(Clone)]
pub struct Incidents {
    store: IncidentStore,
}

impl Incidents {
    pub fn new(store: IncidentStore) -> Self {
        Self { store }
    }

    pub async fn get_all(&self) -> Result<Vec<Incident>, ApiError> {
        let records = self.store.list().await.map_err(|e| {
            error!("error getting incidents from database: {e}");
            ApiError::from(e)
        })?;

        records.into_iter().map(validate_record).collect()
    }

    pub async fn get(&self, id: i64) -> Result<Option<Incident>, ApiError> {
        let record = self.store.get(id).await.map_err(|e| {
            error!("error getting incident: {e}");
            ApiError::from(e)
        })?;

        record.map(validate_record).transpose()
    }

    pub async fn create(&self, payload: serde_json::Value) -> Result<Incident, ApiError> {
        let parsed: CreateIncident = parse_payload(payload)?;

        if parsed.name.is_empty() {
            return Err(ApiError::Validation(
                "name must not be empty".to_string(),
            ));
        }

        let record = self
            .store
            .create(NewIncident {
                name: parsed.name,
                description: parsed.description,
                status: parsed.status.as_str().to_string(),
            })
            .await
            .map_err(|e| {
                error!("error creating incident in database: {e}");
                ApiError::from(e)
            })?;

        validate_record(record)
    }

    pub async fn patch(
        &self,
        id: i64,
        payload: serde_json::Value,
    ) -> Result<Option<Incident>, ApiError> {
        let parsed: PatchIncident = parse_payload(payload)?;

        if parsed.name.as_deref() == Some("") {
            return Err(ApiError::Validation(
                "name must not be empty".to_string(),
            ));
        }

        let changes = IncidentChanges {
            name: parsed.name,
            description: parsed.description,
            status: parsed.status.map(|s| s.as_str().to_string()),
        };

        match self.store.update(id, changes).await {
            Ok(record) => validate_record(record).map(Some),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => {
                error!("error updating incident in database: {e}");
                Err(e.into())
            },
        }
    }

    /// Idempotent delete: a missing id is reported as success.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        match self.store.delete(id).await {
            Ok(()) | Err(StoreError::NotFound { .. }) => Ok(()),
            Err(e) => {
                error!("error deleting incident from database: {e}");
                Err(e.into())
            },
        }
    }
}

/// Check a stored record against the read schema before it leaves the
/// domain layer. A failure means the database holds data this service
/// would never have written.
fn validate_record(record: IncidentRecord) -> Result<Incident, ApiError> {
    let Some(status) = IncidentStatus::parse(&record.status) else {
        error!(
            id = record.id,
            status = %record.status,
            "corrupted incident data in database"
        );
        return Err(ApiError::Corrupted(RESOURCE));
    };

    if record.name.is_empty() {
        error!(id = record.id, "corrupted incident data in database");
        return Err(ApiError::Corrupted(RESOURCE));
    }

    Ok(Incident {
        id: record.id,
        created_at: record.created_at,
        updated_at: record.updated_at,
        name: record.name,
        description: record.description,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(name: &str, status: &str) -> IncidentRecord {
        IncidentRecord {
            id: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            name: name.to_string(),
            description: None,
            status: status.to_string(),
        }
    }

    #[test]
    fn test_validate_record_accepts_known_status() {
        let incident = validate_record(record("Slow Response Times", "open")).unwrap();
        assert_eq!(incident.status, IncidentStatus::Open);
    }

    #[test]
    fn test_validate_record_rejects_unknown_status() {
        let err = validate_record(record("Slow Response Times", "reopened")).unwrap_err();
        assert!(matches!(err, ApiError::Corrupted("incident")));
    }

    #[test]
    fn test_validate_record_rejects_empty_name() {
        let err = validate_record(record("", "open")).unwrap_err();
        assert!(matches!(err, ApiError::Corrupted("incident")));
    }

    #[test]
    fn test_create_payload_rejects_unknown_field() {
        let payload = json!({"name": "x", "status": "open", "severity": "high"});
        assert!(parse_payload::<CreateIncident>(payload).is_err());
    }

    #[test]
    fn test_create_payload_rejects_wrong_type() {
        let payload = json!({"name": 123, "status": "open"});
        assert!(parse_payload::<CreateIncident>(payload).is_err());
    }

    #[test]
    fn test_create_payload_rejects_bad_enum() {
        let payload = json!({"name": "x", "status": "paused"});
        assert!(parse_payload::<CreateIncident>(payload).is_err());
    }

    #[test]
    fn test_create_payload_rejects_client_supplied_id() {
        let payload = json!({"id": 7, "name": "x", "status": "open"});
        assert!(parse_payload::<CreateIncident>(payload).is_err());
    }

    #[test]
    fn test_create_payload_accepts_omitted_description() {
        let payload = json!({"name": "x", "status": "open"});
        let parsed: CreateIncident = parse_payload(payload).unwrap();
        assert_eq!(parsed.description, None);
    }

    #[test]
    fn test_patch_payload_accepts_subset() {
        let payload = json!({"status": "closed"});
        let patch: PatchIncident = parse_payload(payload).unwrap();
        assert!(patch.name.is_none());
        assert_eq!(patch.status, Some(IncidentStatus::Closed));
    }
}
