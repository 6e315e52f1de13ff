//! Runtime settings from the process environment.

use crate::error::ConfigError;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

/// Default request body cap for user writes: 1 MiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1 << 20;

#[derive(Debug, Clone)]
pub struct Settings {
    /// Connection options for the target database. Credentials are kept as
    /// values, never spliced into a URL.
    pub db: PgConnectOptions,
    pub db_max_connections: u32,
    /// When false, sqlx statement logging is turned off and only warnings surface.
    pub db_log_statements: bool,
    /// Run `CREATE DATABASE` for the target database when it is missing.
    pub db_create_database: bool,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_bytes: usize,
}

impl Settings {
    /// Read settings from environment variables. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let db = match get("DATABASE_URL") {
            Some(url) => PgConnectOptions::from_str(&url).map_err(ConfigError::DatabaseUrl)?,
            None => {
                let mut opts = PgConnectOptions::new()
                    .host(&get("DB_HOST").unwrap_or_else(|| "localhost".into()))
                    .port(parse_or("DB_PORT", get("DB_PORT"), 5432u16)?)
                    .username(&get("DB_USER").unwrap_or_else(|| "postgres".into()))
                    .database(&get("DB_NAME").unwrap_or_else(|| "users".into()))
                    .ssl_mode(parse_or("DB_SSLMODE", get("DB_SSLMODE"), PgSslMode::Disable)?);
                // Passwords are taken verbatim: surrounding spaces may be significant.
                if let Some(password) = lookup("DB_PASSWORD").filter(|p| !p.is_empty()) {
                    opts = opts.password(&password);
                }
                opts
            }
        };

        Ok(Settings {
            db,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), 5)?,
            db_log_statements: parse_bool_or("DB_LOG_STATEMENTS", get("DB_LOG_STATEMENTS"), false)?,
            db_create_database: parse_bool_or("DB_CREATE_DATABASE", get("DB_CREATE_DATABASE"), true)?,
            host: parse_or("HOST", get("HOST"), IpAddr::V4(Ipv4Addr::UNSPECIFIED))?,
            port: parse_or("PORT", get("PORT"), 8080)?,
            max_body_bytes: parse_or("MAX_BODY_BYTES", get("MAX_BODY_BYTES"), DEFAULT_MAX_BODY_BYTES)?,
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T: FromStr>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid { key, value: v }),
    }
}

fn parse_bool_or(key: &'static str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(v) = value else {
        return Ok(default);
    };
    match v.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value: v }),
    }
}
