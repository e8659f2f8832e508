use async_trait::async_trait;
use sqlx::PgPool;

use super::manager::DatabaseError;

/// Persistence for terminal staffing entries.
#[async_trait]
pub trait StaffingStore: Send + Sync {
    /// Delete the entry with `id`, returning the number of rows removed.
    ///
    /// Deleting an id that does not exist is not an error and returns 0.
    async fn delete(&self, id: i64) -> Result<u64, DatabaseError>;
}

/// `p_terminal_staffing` table
pub struct PgStaffingStore {
    pool: PgPool,
}

impl PgStaffingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StaffingStore for PgStaffingStore {
    async fn delete(&self, id: i64) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM p_terminal_staffing WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
