//! Item cache capability and its moka-backed implementation.
//!
//! Entries hold a JSON snapshot of an item under `item_{id}`. The cache is a
//! read-through accelerator only: it is populated on read misses and entries
//! are invalidated (never updated in place) after writes.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use inventory_db::ItemRow;
use moka::future::Cache;

/// Cache key for an item snapshot
pub fn item_cache_key(id: i64) -> String {
    format!("item_{id}")
}

#[derive(Debug)]
pub enum CacheError {
    Serialization(serde_json::Error),
    Backend(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Serialization(e) => write!(f, "Cache serialization error: {e}"),
            CacheError::Backend(msg) => write!(f, "Cache backend error: {msg}"),
        }
    }
}

impl std::error::Error for CacheError {}

impl From<serde_json::Error> for CacheError {
    fn from(e: serde_json::Error) -> Self {
        CacheError::Serialization(e)
    }
}

/// Key-value cache with a fixed TTL per entry, counted from the write
#[async_trait]
pub trait ItemCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<ItemRow>, CacheError>;

    async fn set(&self, key: &str, item: &ItemRow) -> Result<(), CacheError>;

    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

/// In-process item cache
pub struct MokaItemCache {
    cache: Cache<String, String>,
}

impl MokaItemCache {
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }
}

#[async_trait]
impl ItemCache for MokaItemCache {
    async fn get(&self, key: &str) -> Result<Option<ItemRow>, CacheError> {
        match self.cache.get(key).await {
            Some(snapshot) => Ok(Some(serde_json::from_str(&snapshot)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, item: &ItemRow) -> Result<(), CacheError> {
        let snapshot = serde_json::to_string(item)?;
        self.cache.insert(key.to_string(), snapshot).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.cache.invalidate(key).await;
        Ok(())
    }
}
