//! In-process schema bootstrap
//!
//! The service owns a three-table schema and ensures it exists at startup.
//! Alert association ids are weak references, deliberately without foreign
//! key constraints.

use sqlx::SqlitePool;

use crate::error::StoreError;

const CREATE_INCIDENTS: &str = "\
CREATE TABLE IF NOT EXISTS incidents (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL,
    name        TEXT NOT NULL,
    description TEXT,
    status      TEXT NOT NULL
)";

const CREATE_SERVICES: &str = "\
CREATE TABLE IF NOT EXISTS services (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL,
    name        TEXT NOT NULL,
    description TEXT
)";

const CREATE_ALERTS: &str = "\
CREATE TABLE IF NOT EXISTS alerts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL,
    name        TEXT NOT NULL,
    description TEXT,
    incident_id INTEGER,
    service_id  INTEGER
)";

/// Create the resource tables if they are missing.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), StoreError> {
    for statement in [CREATE_INCIDENTS, CREATE_SERVICES, CREATE_ALERTS] {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| StoreError::unknown("failed to ensure schema", e))?;
    }

    Ok(())
}
