/*
 * Responsibility
 * - SQLx access to the users table
 * - the Postgres-backed IdentityStore used by the auth middleware
 * - DB errors are returned as RepoError; "no such row" is Ok(None)
 */
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;
use crate::services::auth::IdentityStore;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub image: Option<String>,
}

pub async fn get(db: &PgPool, user_id: i64) -> Result<Option<UserRow>, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, username, email, bio, image
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

/// `IdentityStore` over the shared connection pool.
///
/// The pool is internally reference counted, so cloning the store is cheap.
#[derive(Clone, Debug)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IdentityStore for PgUserStore {
    async fn find_by_id(&self, id: u64) -> Result<Option<UserRow>, RepoError> {
        // Ids above BIGINT range cannot exist in the table.
        let Ok(id) = i64::try_from(id) else {
            return Ok(None);
        };
        get(&self.db, id).await
    }
}
