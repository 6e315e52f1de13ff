//! Persistence seam for users. Handlers only see [`UserStore`]; driver-specific
//! error codes are translated to [`StoreError`] inside each implementation.

mod memory;
mod postgres;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

use crate::model::{NewUser, User, UserChanges};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// A uniquely-constrained column (email) would be duplicated.
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert and return the stored row with its assigned id.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    async fn get(&self, id: u64) -> Result<Option<User>, StoreError>;

    async fn list(&self) -> Result<Vec<User>, StoreError>;

    /// Apply the present fields of `changes`. `None` when no row has `id`.
    async fn update(&self, id: u64, changes: UserChanges) -> Result<Option<User>, StoreError>;

    /// Hard delete. Returns whether a row was removed.
    async fn delete(&self, id: u64) -> Result<bool, StoreError>;

    /// Cheap liveness probe against the backing store.
    async fn ping(&self) -> Result<(), StoreError>;
}
