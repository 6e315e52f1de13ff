//! Schema bootstrap: the `users` table. Idempotent, safe to run on every start.

use sqlx::PgPool;

const USERS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        CONSTRAINT users_email_key UNIQUE (email)
    )
"#;

/// Create the `users` table (with its unique email constraint) when missing.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(USERS_DDL).execute(pool).await?;
    tracing::info!("users table ready");
    Ok(())
}
