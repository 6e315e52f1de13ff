//! Users API: CRUD REST service for a single `User` resource.

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::Settings;
pub use db::{connect, ensure_database_exists};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use model::User;
pub use response::{error_response, json_response};
pub use routes::{app, common_routes, user_routes};
pub use state::AppState;
pub use store::{MemoryUserStore, PgUserStore, StoreError, UserStore};
