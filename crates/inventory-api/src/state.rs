use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::cache::ItemCache;
use crate::services::{AuthService, ItemService};
use crate::store::{ItemStore, UserStore};
use crate::token::TokenIssuer;

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub items: Arc<ItemService>,
    pub tokens: Arc<TokenIssuer>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Wire the services over the given store and cache capabilities
    pub fn new(
        users: Arc<dyn UserStore>,
        items: Arc<dyn ItemStore>,
        cache: Arc<dyn ItemCache>,
        tokens: TokenIssuer,
    ) -> Self {
        let tokens = Arc::new(tokens);
        Self {
            auth: Arc::new(AuthService::new(users, tokens.clone())),
            items: Arc::new(ItemService::new(items, cache)),
            tokens,
            started_at: Utc::now(),
        }
    }
}
