//! Status page storage service
//!
//! CRUD HTTP API over three resources - incidents, services and alerts -
//! persisted in SQLite through sqlx. Clients authenticate with a static
//! bearer token unless the service runs in dev mode.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod store;

use std::sync::Arc;

use sqlx::SqlitePool;

pub use config::Config;
pub use error::{ApiError, StoreError};

use domain::{Alerts, Incidents, Services};
use store::{AlertStore, IncidentStore, ServiceStore};

/// Application state shared across handlers. The pool is the only
/// long-lived shared resource; everything else is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub incidents: Incidents,
    pub services: Services,
    pub alerts: Alerts,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Arc<Config>) -> Self {
        Self {
            incidents: Incidents::new(IncidentStore::new(pool.clone())),
            services: Services::new(ServiceStore::new(pool.clone())),
            alerts: Alerts::new(AlertStore::new(pool)),
            config,
        }
    }
}
