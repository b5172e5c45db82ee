//! Inventory database layer
//!
//! Row types and sqlx query functions for the `users` and `items` tables,
//! shared by the inventory services.

pub mod items;
pub mod schema;
pub mod types;
pub mod users;

pub use sqlx::postgres::PgPool;
pub use types::*;

/// Whether a sqlx error is a unique constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.is_unique_violation(),
        _ => false,
    }
}
