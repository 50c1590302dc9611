//! Service (monitored component) data access

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::error::StoreError;

const RESOURCE: &str = "service";

const COLUMNS: &str = "id, created_at, updated_at, name, description";

#[derive(Debug, Clone, FromRow)]
pub struct ServiceRecord {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewService {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ServiceChanges {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct ServiceStore {
    pool: SqlitePool,
}

impl ServiceStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<ServiceRecord>, StoreError> {
        sqlx::query_as::<_, ServiceRecord>(&format!("SELECT {COLUMNS} FROM services ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::unknown("failed to list services", e))
    }

    pub async fn get(&self, id: i64) -> Result<Option<ServiceRecord>, StoreError> {
        sqlx::query_as::<_, ServiceRecord>(&format!("SELECT {COLUMNS} FROM services WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::unknown(format!("failed to get service {id}"), e))
    }

    pub async fn create(&self, service: NewService) -> Result<ServiceRecord, StoreError> {
        let now = Utc::now();

        sqlx::query_as::<_, ServiceRecord>(&format!(
            "INSERT INTO services (name, description, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4) RETURNING {COLUMNS}"
        ))
        .bind(&service.name)
        .bind(&service.description)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::unknown("failed to create service", e))
    }

    pub async fn update(
        &self,
        id: i64,
        changes: ServiceChanges,
    ) -> Result<ServiceRecord, StoreError> {
        sqlx::query_as::<_, ServiceRecord>(&format!(
            "UPDATE services SET \
                 name = COALESCE(?1, name), \
                 description = COALESCE(?2, description), \
                 updated_at = ?3 \
             WHERE id = ?4 RETURNING {COLUMNS}"
        ))
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::unknown(format!("failed to update service {id}"), e))?
        .ok_or_else(|| StoreError::not_found(RESOURCE, id))
    }

    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM services WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::unknown(format!("failed to delete service {id}"), e))?;

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

    async fn test_store() -> ServiceStore {
        let pool = connect_in_memory().await;
        ensure_schema(&pool).await.unwrap();
        ServiceStore::new(pool)
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let store = test_store().await;

        store
            .create(NewService {
                name: "API Gateway".to_string(),
                description: Some("Main API Gateway service".to_string()),
            })
            .await
            .unwrap();
        store
            .create(NewService {
                name: "User Service".to_string(),
                description: None,
            })
            .await
            .unwrap();

        let services = store.list().await.unwrap();
        assert_eq!(services.len(), 2);
        assert_eq!(services[0].name, "API Gateway");
        assert_eq!(services[1].description, None);
    }

    #[tokio::test]
    async fn test_update_name_only() {
        let store = test_store().await;
        let created = store
            .create(NewService {
                name: "API Gateway".to_string(),
                description: Some("Main API Gateway service".to_string()),
            })
            .await
            .unwrap();

        let updated = store
            .update(
                created.id,
                ServiceChanges {
                    name: Some("Updated Name".to_string()),
                    description: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Updated Name");
        assert_eq!(
            updated.description.as_deref(),
            Some("Main API Gateway service")
        );
        assert_eq!(updated.id, created.id);
    }
}
