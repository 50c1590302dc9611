//! Service (monitored component) domain service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::error::{ApiError, StoreError};
use crate::store::{NewService, ServiceChanges, ServiceRecord, ServiceStore};

use super::parse_payload;

/// Monitored service as returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateService {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PatchService {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct Services {
    store: ServiceStore,
}

impl Services {
    pub fn new(store: ServiceStore) -> Self {
        Self { store }
    }

    pub async fn get_all(&self) -> Result<Vec<Service>, ApiError> {
        let records = self.store.list().await.map_err(|e| {
            error!("error getting services from database: {e}");
            ApiError::from(e)
        })?;

        Ok(records.into_iter().map(from_record).collect())
    }

    pub async fn get(&self, id: i64) -> Result<Option<Service>, ApiError> {
        let record = self.store.get(id).await.map_err(|e| {
            error!("error getting service: {e}");
            ApiError::from(e)
        })?;

        Ok(record.map(from_record))
    }

    pub async fn create(&self, payload: serde_json::Value) -> Result<Service, ApiError> {
        let parsed: CreateService = parse_payload(payload)?;

        let record = self
            .store
            .create(NewService {
                name: parsed.name,
                description: parsed.description,
            })
            .await
            .map_err(|e| {
                error!("error creating service in database: {e}");
                ApiError::from(e)
            })?;

        Ok(from_record(record))
    }

    pub async fn patch(
        &self,
        id: i64,
        payload: serde_json::Value,
    ) -> Result<Option<Service>, ApiError> {
        let parsed: PatchService = parse_payload(payload)?;

        let changes = ServiceChanges {
            name: parsed.name,
            description: parsed.description,
        };

        match self.store.update(id, changes).await {
            Ok(record) => Ok(Some(from_record(record))),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => {
                error!("error updating service in database: {e}");
                Err(e.into())
            },
        }
    }

    /// Idempotent delete: a missing id is reported as success.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        match self.store.delete(id).await {
            Ok(()) | Err(StoreError::NotFound { .. }) => Ok(()),
            Err(e) => {
                error!("error deleting service from database: {e}");
                Err(e.into())
            },
        }
    }
}

/// The service read schema is fully enforced by the store's row types, so
/// this conversion cannot fail.
fn from_record(record: ServiceRecord) -> Service {
    Service {
        id: record.id,
        created_at: record.created_at,
        updated_at: record.updated_at,
        name: record.name,
        description: record.description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_payload_rejects_unknown_field() {
        let payload = json!({"name": "API Gateway", "owner": "platform"});
        assert!(parse_payload::<CreateService>(payload).is_err());
    }

    #[test]
    fn test_create_payload_allows_null_description() {
        let payload = json!({"name": "API Gateway", "description": null});
        let parsed: CreateService = parse_payload(payload).unwrap();
        assert_eq!(parsed.description, None);
    }

    #[test]
    fn test_create_payload_accepts_omitted_description() {
        let payload = json!({"name": "API Gateway"});
        let parsed: CreateService = parse_payload(payload).unwrap();
        assert_eq!(parsed.description, None);
    }

    #[test]
    fn test_patch_payload_accepts_name_only() {
        let payload = json!({"name": "Updated Name"});
        let parsed: PatchService = parse_payload(payload).unwrap();
        assert_eq!(parsed.name.as_deref(), Some("Updated Name"));
        assert!(parsed.description.is_none());
    }
}
