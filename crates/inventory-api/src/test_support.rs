//! Instrumented in-memory capabilities for tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use inventory_db::{CreateItemParams, ItemRow, UpdateItemParams};

use crate::cache::{CacheError, ItemCache, MokaItemCache};
use crate::state::AppState;
use crate::store::{ItemStore, MemoryStore, StoreError};
use crate::token::TokenIssuer;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-testing";

/// Item store that counts every call before delegating to [`MemoryStore`]
pub struct RecordingItemStore {
    inner: MemoryStore,
    calls: AtomicUsize,
}

impl RecordingItemStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn item_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ItemStore for RecordingItemStore {
    async fn create_item(&self, params: &CreateItemParams) -> Result<ItemRow, StoreError> {
        self.record();
        self.inner.create_item(params).await
    }

    async fn get_item(&self, id: i64) -> Result<Option<ItemRow>, StoreError> {
        self.record();
        self.inner.get_item(id).await
    }

    async fn list_items(&self) -> Result<Vec<ItemRow>, StoreError> {
        self.record();
        self.inner.list_items().await
    }

    async fn update_item(
        &self,
        id: i64,
        params: &UpdateItemParams,
    ) -> Result<Option<ItemRow>, StoreError> {
        self.record();
        self.inner.update_item(id, params).await
    }

    async fn delete_item(&self, id: i64) -> Result<bool, StoreError> {
        self.record();
        self.inner.delete_item(id).await
    }
}

/// Moka cache with per-operation counters and one-shot failure injection
pub struct RecordingCache {
    inner: MokaItemCache,
    gets: AtomicUsize,
    sets: AtomicUsize,
    deletes: AtomicUsize,
    fail_next: AtomicBool,
}

impl RecordingCache {
    pub fn new() -> Self {
        Self {
            inner: MokaItemCache::new(1_000, Duration::from_secs(300)),
            gets: AtomicUsize::new(0),
            sets: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
            fail_next: AtomicBool::new(false),
        }
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.gets.load(Ordering::SeqCst) + self.sets() + self.deletes()
    }

    /// Read an entry without counting it
    pub async fn peek(&self, key: &str) -> Option<ItemRow> {
        self.inner.get(key).await.ok().flatten()
    }

    /// Make the next cache operation fail
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    fn check_failure(&self) -> Result<(), CacheError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(CacheError::Backend("injected failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ItemCache for RecordingCache {
    async fn get(&self, key: &str) -> Result<Option<ItemRow>, CacheError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, item: &ItemRow) -> Result<(), CacheError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        self.inner.set(key, item).await
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        self.inner.delete(key).await
    }
}

pub struct TestApp {
    pub state: AppState,
    pub store: Arc<RecordingItemStore>,
    pub cache: Arc<RecordingCache>,
}

/// App state over in-memory users, a recording item store and a recording cache
pub fn test_app() -> TestApp {
    let store = Arc::new(RecordingItemStore::new());
    let cache = Arc::new(RecordingCache::new());
    let tokens = TokenIssuer::new(TEST_SECRET, Duration::from_secs(300));
    let state = AppState::new(
        Arc::new(MemoryStore::new()),
        store.clone(),
        cache.clone(),
        tokens,
    );
    TestApp {
        state,
        store,
        cache,
    }
}
