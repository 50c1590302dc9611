//! Data-access layer
//!
//! One module per resource. Each store holds a cloned `SqlitePool` and
//! translates CRUD calls into SQL, classifying failures into
//! `StoreError::NotFound` vs `StoreError::Unknown`.

pub mod alerts;
pub mod incidents;
pub mod schema;
pub mod services;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

pub use alerts::{AlertChanges, AlertRecord, AlertStore, NewAlert};
pub use incidents::{IncidentChanges, IncidentRecord, IncidentStore, NewIncident};
pub use services::{NewService, ServiceChanges, ServiceRecord, ServiceStore};

use crate::error::StoreError;

/// Open a connection pool against the configured database URL, creating
/// the database file if it does not exist yet.
pub async fn connect(database_url: &str) -> Result<SqlitePool, StoreError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StoreError::unknown(format!("invalid database URL {database_url}"), e))?
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .map_err(|e| StoreError::unknown("failed to connect to database", e))
}

/// Single-connection in-memory pool for unit tests. One connection only:
/// every pooled connection would otherwise see its own empty database.
#[cfg(test)]
pub(crate) async fn connect_in_memory() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite pool")
}
