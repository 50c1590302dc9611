//! Alert domain service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::error::{ApiError, StoreError};
use crate::store::{AlertChanges, AlertRecord, AlertStore, NewAlert};

use super::parse_payload;

/// Alert as returned to clients. The association ids are weak references
/// to an incident and a service; nothing guarantees the target rows exist.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub description: Option<String>,
    pub incident_id: Option<i64>,
    pub service_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateAlert {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub incident_id: Option<i64>,
    #[serde(default)]
    pub service_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PatchAlert {
    pub name: Option<String>,
    pub description: Option<String>,
    pub incident_id: Option<i64>,
    pub service_id: Option<i64>,
}

#[derive(Clone)]
pub struct Alerts {
    store: AlertStore,
}

impl Alerts {
    pub fn new(store: AlertStore) -> Self {
        Self { store }
    }

    pub async fn get_all(&self) -> Result<Vec<Alert>, ApiError> {
        let records = self.store.list().await.map_err(|e| {
            error!("error getting alerts from database: {e}");
            ApiError::from(e)
        })?;

        Ok(records.into_iter().map(from_record).collect())
    }

    pub async fn get(&self, id: i64) -> Result<Option<Alert>, ApiError> {
        let record = self.store.get(id).await.map_err(|e| {
            error!("error getting alert: {e}");
            ApiError::from(e)
        })?;

        Ok(record.map(from_record))
    }

    pub async fn create(&self, payload: serde_json::Value) -> Result<Alert, ApiError> {
        let parsed: CreateAlert = parse_payload(payload)?;

        let record = self
            .store
            .create(NewAlert {
                name: parsed.name,
                description: parsed.description,
                incident_id: parsed.incident_id,
                service_id: parsed.service_id,
            })
            .await
            .map_err(|e| {
                error!("error creating alert in database: {e}");
                ApiError::from(e)
            })?;

        Ok(from_record(record))
    }

    pub async fn patch(
        &self,
        id: i64,
        payload: serde_json::Value,
    ) -> Result<Option<Alert>, ApiError> {
        let parsed: PatchAlert = parse_payload(payload)?;

        let changes = AlertChanges {
            name: parsed.name,
            description: parsed.description,
            incident_id: parsed.incident_id,
            service_id: parsed.service_id,
        };

        match self.store.update(id, changes).await {
            Ok(record) => Ok(Some(from_record(record))),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => {
                error!("error updating alert in database: {e}");
                Err(e.into())
            },
        }
    }

    /// Idempotent delete: a missing id is reported as success.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        match self.store.delete(id).await {
            Ok(()) | Err(StoreError::NotFound { .. }) => Ok(()),
            Err(e) => {
                error!("error deleting alert from database: {e}");
                Err(e.into())
            },
        }
    }
}

fn from_record(record: AlertRecord) -> Alert {
    Alert {
        id: record.id,
        created_at: record.created_at,
        updated_at: record.updated_at,
        name: record.name,
        description: record.description,
        incident_id: record.incident_id,
        service_id: record.service_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_payload_rejects_wrong_name_type() {
        let payload = json!({"name": 123});
        assert!(parse_payload::<CreateAlert>(payload).is_err());
    }

    #[test]
    fn test_create_payload_accepts_associations() {
        let payload = json!({"name": "API Gateway Alert", "incidentId": 1, "serviceId": 2});
        let parsed: CreateAlert = parse_payload(payload).unwrap();
        assert_eq!(parsed.incident_id, Some(1));
        assert_eq!(parsed.service_id, Some(2));
    }

    #[test]
    fn test_create_payload_rejects_snake_case_field() {
        // The API surface is camelCase; incident_id is an unknown field.
        let payload = json!({"name": "x", "incident_id": 1});
        assert!(parse_payload::<CreateAlert>(payload).is_err());
    }
}
