//! Alert data access
//!
//! `incident_id` and `service_id` are weak references: plain nullable
//! integers, looked up by callers when needed, with no constraint enforced
//! at write time.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::error::StoreError;

const RESOURCE: &str = "alert";

const COLUMNS: &str = "id, created_at, updated_at, name, description, incident_id, service_id";

#[derive(Debug, Clone, FromRow)]
pub struct AlertRecord {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub description: Option<String>,
    pub incident_id: Option<i64>,
    pub service_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewAlert {
    pub name: String,
    pub description: Option<String>,
    pub incident_id: Option<i64>,
    pub service_id: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct AlertChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub incident_id: Option<i64>,
    pub service_id: Option<i64>,
}

#[derive(Clone)]
pub struct AlertStore {
    pool: SqlitePool,
}

impl AlertStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<AlertRecord>, StoreError> {
        sqlx::query_as::<_, AlertRecord>(&format!("SELECT {COLUMNS} FROM alerts ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::unknown("failed to list alerts", e))
    }

    pub async fn get(&self, id: i64) -> Result<Option<AlertRecord>, StoreError> {
        sqlx::query_as::<_, AlertRecord>(&format!("SELECT {COLUMNS} FROM alerts WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::unknown(format!("failed to get alert {id}"), e))
    }

    pub async fn create(&self, alert: NewAlert) -> Result<AlertRecord, StoreError> {
        let now = Utc::now();

        sqlx::query_as::<_, AlertRecord>(&format!(
            "INSERT INTO alerts (name, description, incident_id, service_id, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING {COLUMNS}"
        ))
        .bind(&alert.name)
        .bind(&alert.description)
        .bind(alert.incident_id)
        .bind(alert.service_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::unknown("failed to create alert", e))
    }

    pub async fn update(&self, id: i64, changes: AlertChanges) -> Result<AlertRecord, StoreError> {
        sqlx::query_as::<_, AlertRecord>(&format!(
            "UPDATE alerts SET \
                 name = COALESCE(?1, name), \
                 description = COALESCE(?2, description), \
                 incident_id = COALESCE(?3, incident_id), \
                 service_id = COALESCE(?4, service_id), \
                 updated_at = ?5 \
             WHERE id = ?6 RETURNING {COLUMNS}"
        ))
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.incident_id)
        .bind(changes.service_id)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::unknown(format!("failed to update alert {id}"), e))?
        .ok_or_else(|| StoreError::not_found(RESOURCE, id))
    }

    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM alerts WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::unknown(format!("failed to delete alert {id}"), e))?;

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

    async fn test_store() -> AlertStore {
        let pool = connect_in_memory().await;
        ensure_schema(&pool).await.unwrap();
        AlertStore::new(pool)
    }

    #[tokio::test]
    async fn test_create_with_associations() {
        let store = test_store().await;

        let alert = store
            .create(NewAlert {
                name: "API Gateway Alert".to_string(),
                description: None,
                incident_id: Some(1),
                service_id: Some(2),
            })
            .await
            .unwrap();

        assert_eq!(alert.incident_id, Some(1));
        assert_eq!(alert.service_id, Some(2));
    }

    #[tokio::test]
    async fn test_dangling_association_accepted() {
        // Associations are weak references; no integrity check at write time.
        let store = test_store().await;

        let alert = store
            .create(NewAlert {
                name: "Orphan".to_string(),
                description: None,
                incident_id: Some(9999),
                service_id: None,
            })
            .await
            .unwrap();

        assert_eq!(alert.incident_id, Some(9999));
    }
}
