//! Inventory API
//!
//! Token-authenticated CRUD over inventory items. Item reads go through a
//! cache-aside layer keyed `item_{id}`; item writes invalidate it.

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod password;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod token;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use error::{AppError, StartupError};
pub use routes::create_router;
pub use state::AppState;
