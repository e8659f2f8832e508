use async_trait::async_trait;
use sqlx::PgPool;

use super::manager::DatabaseError;

/// Read-only view of the account directory used for authorization.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// True when an account row exists for `cid`.
    async fn account_exists(&self, cid: i64) -> Result<bool, DatabaseError>;
}

/// `users` table lookup
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn account_exists(&self, cid: i64) -> Result<bool, DatabaseError> {
        let row: Option<i32> = sqlx::query_scalar("SELECT 1 FROM users WHERE cid = $1 LIMIT 1")
            .bind(cid)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }
}
