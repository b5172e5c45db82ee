//! Persistence capabilities consumed by the services.
//!
//! The services only see [`UserStore`] and [`ItemStore`]; PostgreSQL and an
//! in-memory backend implement both.

mod memory;
mod postgres;

use std::fmt;

use async_trait::async_trait;
use inventory_db::{CreateItemParams, CreateUserParams, ItemRow, UpdateItemParams, UserRow};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug)]
pub enum StoreError {
    /// A unique constraint (username, item name) was violated
    Conflict,
    Database(sqlx::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Conflict => write!(f, "Unique constraint violated"),
            StoreError::Database(e) => write!(f, "Database error: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(e) => Some(e),
            StoreError::Conflict => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if inventory_db::is_unique_violation(&e) {
            StoreError::Conflict
        } else {
            StoreError::Database(e)
        }
    }
}

/// Durable user records keyed by unique username
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, params: &CreateUserParams) -> Result<UserRow, StoreError>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>, StoreError>;
}

/// Durable, uniquely-named item records
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn create_item(&self, params: &CreateItemParams) -> Result<ItemRow, StoreError>;

    async fn get_item(&self, id: i64) -> Result<Option<ItemRow>, StoreError>;

    /// All items in ascending id order
    async fn list_items(&self) -> Result<Vec<ItemRow>, StoreError>;

    /// Returns `None` when no item has this id
    async fn update_item(
        &self,
        id: i64,
        params: &UpdateItemParams,
    ) -> Result<Option<ItemRow>, StoreError>;

    /// Returns whether an item was removed
    async fn delete_item(&self, id: i64) -> Result<bool, StoreError>;
}
