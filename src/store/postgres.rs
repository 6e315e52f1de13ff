//! PostgreSQL-backed user store.

use super::{StoreError, UserStore};
use crate::model::{NewUser, User, UserChanges};
use async_trait::async_trait;
use sqlx::PgPool;

const COLUMNS: &str = "id, name, email";

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        // BIGSERIAL ids start at 1.
        User {
            id: row.id as u64,
            name: row.name,
            email: row.email,
        }
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        PgUserStore { pool }
    }
}

/// Single translation point from driver errors to store errors.
fn map_db_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return StoreError::Conflict(db.message().to_string());
        }
    }
    StoreError::Db(e)
}

/// Ids beyond `i64::MAX` cannot exist in a BIGSERIAL column.
fn pg_id(id: u64) -> Option<i64> {
    i64::try_from(id).ok()
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let sql = format!("INSERT INTO users (name, email) VALUES ($1, $2) RETURNING {}", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let row: UserRow = sqlx::query_as(&sql)
            .bind(&user.name)
            .bind(&user.email)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(row.into())
    }

    async fn get(&self, id: u64) -> Result<Option<User>, StoreError> {
        let Some(id) = pg_id(id) else {
            return Ok(None);
        };
        let sql = format!("SELECT {} FROM users WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(row.map(User::from))
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let sql = format!("SELECT {} FROM users ORDER BY id", COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<UserRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn update(&self, id: u64, changes: UserChanges) -> Result<Option<User>, StoreError> {
        let Some(id) = pg_id(id) else {
            return Ok(None);
        };
        let sql = format!(
            "UPDATE users SET name = COALESCE($2, name), email = COALESCE($3, email) WHERE id = $1 RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(changes.name)
            .bind(changes.email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(row.map(User::from))
    }

    async fn delete(&self, id: u64) -> Result<bool, StoreError> {
        let Some(id) = pg_id(id) else {
            return Ok(false);
        };
        let sql = "DELETE FROM users WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}
