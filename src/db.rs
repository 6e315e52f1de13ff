//! Persistence connector: database bootstrap and pool creation.

use crate::config::Settings;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};

/// Database used for the admin connection that creates the target database.
const ADMIN_DATABASE: &str = "postgres";

/// Open the pool described by `settings`. Statement logging follows `db_log_statements`.
pub async fn connect(settings: &Settings) -> Result<PgPool, sqlx::Error> {
    let mut opts = settings.db.clone();
    if !settings.db_log_statements {
        opts = opts.disable_statement_logging();
    }
    let pool = PgPoolOptions::new()
        .max_connections(settings.db_max_connections)
        .connect_with(opts)
        .await?;
    tracing::info!(max_connections = settings.db_max_connections, "database pool ready");
    Ok(pool)
}

/// Ensure the database named in `opts` exists; create it if not. Connects to the
/// `postgres` database on the same server to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(opts: &PgConnectOptions) -> Result<(), sqlx::Error> {
    let Some(db_name) = target_database(opts) else {
        return Ok(());
    };
    let mut conn = admin_options(opts).connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// The database to create, if any. The admin database itself is never created.
fn target_database(opts: &PgConnectOptions) -> Option<String> {
    opts.get_database()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != ADMIN_DATABASE)
        .map(str::to_string)
}

/// Same server, credentials and TLS settings, pointed at the admin database.
fn admin_options(opts: &PgConnectOptions) -> PgConnectOptions {
    opts.clone().database(ADMIN_DATABASE).disable_statement_logging()
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
