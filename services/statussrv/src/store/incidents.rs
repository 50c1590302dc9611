//! Incident data access

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::error::StoreError;

const RESOURCE: &str = "incident";

const COLUMNS: &str = "id, created_at, updated_at, name, description, status";

/// Raw incident row as persisted. `status` stays a plain string here; the
/// domain layer decides whether it is a valid status value.
#[derive(Debug, Clone, FromRow)]
pub struct IncidentRecord {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
}

/// Fields for an insert. Timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewIncident {
    pub name: String,
    pub description: Option<String>,
    pub status: String,
}

/// Partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct IncidentChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

#[derive(Clone)]
pub struct IncidentStore {
    pool: SqlitePool,
}

impl IncidentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<IncidentRecord>, StoreError> {
        sqlx::query_as::<_, IncidentRecord>(&format!(
            "SELECT {COLUMNS} FROM incidents ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::unknown("failed to list incidents", e))
    }

    pub async fn get(&self, id: i64) -> Result<Option<IncidentRecord>, StoreError> {
        sqlx::query_as::<_, IncidentRecord>(&format!(
            "SELECT {COLUMNS} FROM incidents WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::unknown(format!("failed to get incident {id}"), e))
    }

    pub async fn create(&self, incident: NewIncident) -> Result<IncidentRecord, StoreError> {
        let now = Utc::now();

        sqlx::query_as::<_, IncidentRecord>(&format!(
            "INSERT INTO incidents (name, description, status, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5) RETURNING {COLUMNS}"
        ))
        .bind(&incident.name)
        .bind(&incident.description)
        .bind(&incident.status)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::unknown("failed to create incident", e))
    }

    /// Apply a partial update. Reports `NotFound` when the id has no row.
    pub async fn update(
        &self,
        id: i64,
        changes: IncidentChanges,
    ) -> Result<IncidentRecord, StoreError> {
        sqlx::query_as::<_, IncidentRecord>(&format!(
            "UPDATE incidents SET \
                 name = COALESCE(?1, name), \
                 description = COALESCE(?2, description), \
                 status = COALESCE(?3, status), \
                 updated_at = ?4 \
             WHERE id = ?5 RETURNING {COLUMNS}"
        ))
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(&changes.status)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::unknown(format!("failed to update incident {id}"), e))?
        .ok_or_else(|| StoreError::not_found(RESOURCE, id))
    }

    /// Delete by id. Reports `NotFound` when nothing was deleted; the layer
    /// above treats that as success.
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM incidents WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::unknown(format!("failed to delete incident {id}"), e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(RESOURCE, id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{connect_in_memory, schema::ensure_schema};

    async fn test_store() -> IncidentStore {
        let pool = connect_in_memory().await;
        ensure_schema(&pool).await.unwrap();
        IncidentStore::new(pool)
    }

    fn new_incident(name: &str) -> NewIncident {
        NewIncident {
            name: name.to_string(),
            description: Some("something broke".to_string()),
            status: "open".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamps() {
        let store = test_store().await;

        let record = store.create(new_incident("Slow Response Times")).await.unwrap();

        assert_eq!(record.id, 1);
        assert_eq!(record.name, "Slow Response Times");
        assert_eq!(record.status, "open");
        assert_eq!(record.created_at, record.updated_at);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let store = test_store().await;
        assert!(store.get(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = test_store().await;

        let err = store
            .update(7, IncidentChanges::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let store = test_store().await;
        let created = store.create(new_incident("High CPU Usage")).await.unwrap();

        let changes = IncidentChanges {
            status: Some("closed".to_string()),
            ..Default::default()
        };
        let updated = store.update(created.id, changes).await.unwrap();

        assert_eq!(updated.name, "High CPU Usage");
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.status, "closed");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let store = test_store().await;

        let created = store.create(new_incident("Flapping")).await.unwrap();
        store.delete(created.id).await.unwrap();

        let err = store.delete(created.id).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
