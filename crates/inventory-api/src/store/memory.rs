use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use inventory_db::{CreateItemParams, CreateUserParams, ItemRow, UpdateItemParams, UserRow};
use tokio::sync::RwLock;

use super::{ItemStore, StoreError, UserStore};

#[derive(Default)]
struct Tables {
    users: HashMap<String, UserRow>,
    items: BTreeMap<i64, ItemRow>,
    next_user_id: i64,
    next_item_id: i64,
}

impl Tables {
    fn name_taken(&self, name: &str, except_id: Option<i64>) -> bool {
        self.items
            .values()
            .any(|item| item.name == name && Some(item.id) != except_id)
    }
}

/// In-memory store used for tests and database-less runs.
///
/// Each operation holds the table lock for its whole duration, so unique
/// checks and writes are atomic per call.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, params: &CreateUserParams) -> Result<UserRow, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.contains_key(&params.username) {
            return Err(StoreError::Conflict);
        }

        tables.next_user_id += 1;
        let row = UserRow {
            id: tables.next_user_id,
            username: params.username.clone(),
            email: params.email.clone(),
            password_hash: params.password_hash.clone(),
            date_joined: Utc::now(),
        };
        tables.users.insert(row.username.clone(), row.clone());
        Ok(row)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>, StoreError> {
        Ok(self.tables.read().await.users.get(username).cloned())
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn create_item(&self, params: &CreateItemParams) -> Result<ItemRow, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.name_taken(&params.name, None) {
            return Err(StoreError::Conflict);
        }

        tables.next_item_id += 1;
        let row = ItemRow {
            id: tables.next_item_id,
            name: params.name.clone(),
            description: params.description.clone(),
            quantity: params.quantity,
        };
        tables.items.insert(row.id, row.clone());
        Ok(row)
    }

    async fn get_item(&self, id: i64) -> Result<Option<ItemRow>, StoreError> {
        Ok(self.tables.read().await.items.get(&id).cloned())
    }

    async fn list_items(&self) -> Result<Vec<ItemRow>, StoreError> {
        Ok(self.tables.read().await.items.values().cloned().collect())
    }

    async fn update_item(
        &self,
        id: i64,
        params: &UpdateItemParams,
    ) -> Result<Option<ItemRow>, StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(name) = &params.name {
            if tables.name_taken(name, Some(id)) {
                return Err(StoreError::Conflict);
            }
        }

        match tables.items.get_mut(&id) {
            Some(row) => {
                params.apply_to(row);
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_item(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.tables.write().await.items.remove(&id).is_some())
    }
}
