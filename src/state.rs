use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::{
    DatabaseManager, PgStaffingStore, PgUserDirectory, StaffingStore, UserDirectory,
};

/// Shared handler context. Cloned per request; everything inside is shared.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserDirectory>,
    pub staffing: Arc<dyn StaffingStore>,
    /// Present when backed by Postgres; used by `/health`.
    pub database: Option<DatabaseManager>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserDirectory>,
        staffing: Arc<dyn StaffingStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            users,
            staffing,
            database: None,
        }
    }

    /// Postgres-backed directory and staffing store sharing one pool
    pub fn from_database(config: AppConfig, database: DatabaseManager) -> Self {
        let users = Arc::new(PgUserDirectory::new(database.pool().clone()));
        let staffing = Arc::new(PgStaffingStore::new(database.pool().clone()));

        Self {
            config: Arc::new(config),
            users,
            staffing,
            database: Some(database),
        }
    }
}
