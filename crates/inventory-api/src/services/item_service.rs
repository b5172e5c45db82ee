//! Item CRUD with a cache-aside read path.
//!
//! Reads check the cache first and populate it on a miss. Writes go to the
//! store first and then delete the cache entry. A `get` that races between
//! the store write and the cache delete can re-cache the old snapshot; that
//! entry lives at most one cache TTL.

use std::fmt;
use std::sync::Arc;

use inventory_db::{CreateItemParams, ItemRow, UpdateItemParams};
use tracing::{debug, info, warn};

use crate::auth::Actor;
use crate::cache::{item_cache_key, CacheError, ItemCache};
use crate::store::{ItemStore, StoreError};
use crate::validation;

#[derive(Debug)]
pub enum ItemError {
    DuplicateName,
    NotFound(i64),
    Validation(String),
    Internal(String),
}

impl fmt::Display for ItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemError::DuplicateName => write!(f, "Item name already exists"),
            ItemError::NotFound(id) => write!(f, "Item {id} not found"),
            ItemError::Validation(msg) => write!(f, "Validation error: {msg}"),
            ItemError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ItemError {}

impl From<StoreError> for ItemError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict => ItemError::DuplicateName,
            StoreError::Database(e) => ItemError::Internal(e.to_string()),
        }
    }
}

impl From<CacheError> for ItemError {
    fn from(e: CacheError) -> Self {
        ItemError::Internal(e.to_string())
    }
}

/// Item fields as submitted by a client; absent fields are `None`
#[derive(Debug, Clone, Default)]
pub struct ItemFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
}

/// How an update treats absent fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// `name` and `description` are required; absent `quantity` resets to 0
    Replace,
    /// Only the supplied fields change
    Partial,
}

pub struct ItemService {
    store: Arc<dyn ItemStore>,
    cache: Arc<dyn ItemCache>,
}

impl ItemService {
    pub fn new(store: Arc<dyn ItemStore>, cache: Arc<dyn ItemCache>) -> Self {
        Self { store, cache }
    }

    /// Persist a new item. The cache is left alone; it fills on the first read.
    pub async fn create(&self, actor: &Actor, fields: ItemFields) -> Result<ItemRow, ItemError> {
        info!(username = %actor.username(), "Creating item");

        let params = new_item_params(fields)?;
        let item = self.store.create_item(&params).await.map_err(|e| {
            if matches!(e, StoreError::Conflict) {
                warn!(name = %params.name, "Item name already exists");
            }
            ItemError::from(e)
        })?;

        info!(item_id = item.id, name = %item.name, "Item created");
        Ok(item)
    }

    /// Cache-aside read. A cache hit is returned without consulting the store.
    pub async fn get(&self, actor: &Actor, id: i64) -> Result<ItemRow, ItemError> {
        info!(username = %actor.username(), item_id = id, "Retrieving item");
        let key = item_cache_key(id);

        if let Some(item) = self.cache.get(&key).await? {
            debug!(item_id = id, "Item served from cache");
            return Ok(item);
        }

        let Some(item) = self.store.get_item(id).await? else {
            warn!(item_id = id, "Item not found");
            return Err(ItemError::NotFound(id));
        };

        self.cache.set(&key, &item).await?;
        info!(item_id = id, "Item loaded from store and cached");
        Ok(item)
    }

    /// Apply field changes, then invalidate the cached snapshot
    pub async fn update(
        &self,
        actor: &Actor,
        id: i64,
        fields: ItemFields,
        mode: UpdateMode,
    ) -> Result<ItemRow, ItemError> {
        info!(username = %actor.username(), item_id = id, ?mode, "Updating item");

        if self.store.get_item(id).await?.is_none() {
            return Err(self.not_found(id).await);
        }

        let params = update_item_params(fields, mode)?;
        let Some(item) = self.store.update_item(id, &params).await? else {
            return Err(self.not_found(id).await);
        };

        self.invalidate(id).await?;
        info!(item_id = id, "Item updated");
        Ok(item)
    }

    /// Remove an item, then invalidate the cached snapshot
    pub async fn delete(&self, actor: &Actor, id: i64) -> Result<(), ItemError> {
        info!(username = %actor.username(), item_id = id, "Deleting item");

        if !self.store.delete_item(id).await? {
            return Err(self.not_found(id).await);
        }

        self.invalidate(id).await?;
        info!(item_id = id, "Item deleted");
        Ok(())
    }

    /// All items straight from the store
    pub async fn list(&self, actor: &Actor) -> Result<Vec<ItemRow>, ItemError> {
        info!(username = %actor.username(), "Listing items");
        let items = self.store.list_items().await?;
        info!(count = items.len(), "Items listed");
        Ok(items)
    }

    async fn invalidate(&self, id: i64) -> Result<(), ItemError> {
        self.cache.delete(&item_cache_key(id)).await?;
        info!(item_id = id, "Item cache invalidated");
        Ok(())
    }

    /// A write found no row. A snapshot left behind by an earlier write whose
    /// invalidation failed is still evicted, so retrying heals the cache.
    async fn not_found(&self, id: i64) -> ItemError {
        warn!(item_id = id, "Item not found");
        match self.invalidate(id).await {
            Ok(()) => ItemError::NotFound(id),
            Err(e) => e,
        }
    }
}

fn new_item_params(fields: ItemFields) -> Result<CreateItemParams, ItemError> {
    let name = validation::required(validation::trimmed(fields.name), "name")
        .map_err(ItemError::Validation)?;
    let description = validation::required(validation::trimmed(fields.description), "description")
        .map_err(ItemError::Validation)?;
    validation::validate_item_name(&name).map_err(ItemError::Validation)?;
    validation::validate_item_description(&description).map_err(ItemError::Validation)?;

    Ok(CreateItemParams {
        name,
        description,
        quantity: fields.quantity.unwrap_or(0),
    })
}

fn update_item_params(fields: ItemFields, mode: UpdateMode) -> Result<UpdateItemParams, ItemError> {
    match mode {
        UpdateMode::Replace => {
            let full = new_item_params(fields)?;
            Ok(UpdateItemParams {
                name: Some(full.name),
                description: Some(full.description),
                quantity: Some(full.quantity),
            })
        }
        UpdateMode::Partial => {
            let name = validation::trimmed(fields.name);
            let description = validation::trimmed(fields.description);
            if let Some(name) = &name {
                validation::validate_item_name(name).map_err(ItemError::Validation)?;
            }
            if let Some(description) = &description {
                validation::validate_item_description(description)
                    .map_err(ItemError::Validation)?;
            }
            Ok(UpdateItemParams {
                name,
                description,
                quantity: fields.quantity,
            })
        }
    }
}
