pub mod auth_service;
pub mod item_service;

pub use auth_service::{AuthError, AuthService, RegisteredUser};
pub use item_service::{ItemError, ItemFields, ItemService, UpdateMode};
