/*
 * Responsibility
 * - users テーブルの存在確認 (認証 middleware から呼ばれる)
 * - PgPool を受け取り lookup を提供
 * - 見つからない場合は RepoError::NotFound、それ以外の DB エラーは RepoError::Db
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserRecord {
    #[sqlx(rename = "userId")]
    pub id: Uuid,
}

/// Read access to persisted users.
///
/// Implementations are shared across concurrent requests behind an `Arc`, so
/// they must be safe to call from many tasks at once.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    // Returns the backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Look up a user by primary key.
    //
    // Returns:
    // - `Ok(record)`              if the user exists
    // - `Err(RepoError::NotFound)` if it does not
    // - `Err(RepoError::Db(_))`    on any backend failure
    async fn find_by_id(&self, id: Uuid) -> RepoResult<UserRecord>;
}

#[derive(Clone, Debug)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<UserRecord> {
        let row = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT "userId"
            FROM users
            WHERE "userId" = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(RepoError::NotFound)
    }
}
