use async_trait::async_trait;
use inventory_db::{CreateItemParams, CreateUserParams, ItemRow, UpdateItemParams, UserRow};
use sqlx::PgPool;

use super::{ItemStore, StoreError, UserStore};

/// PostgreSQL-backed user and item store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, params: &CreateUserParams) -> Result<UserRow, StoreError> {
        Ok(inventory_db::users::create(&self.pool, params).await?)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>, StoreError> {
        Ok(inventory_db::users::get_by_username(&self.pool, username).await?)
    }
}

#[async_trait]
impl ItemStore for PgStore {
    async fn create_item(&self, params: &CreateItemParams) -> Result<ItemRow, StoreError> {
        Ok(inventory_db::items::create(&self.pool, params).await?)
    }

    async fn get_item(&self, id: i64) -> Result<Option<ItemRow>, StoreError> {
        Ok(inventory_db::items::get(&self.pool, id).await?)
    }

    async fn list_items(&self) -> Result<Vec<ItemRow>, StoreError> {
        Ok(inventory_db::items::list(&self.pool).await?)
    }

    async fn update_item(
        &self,
        id: i64,
        params: &UpdateItemParams,
    ) -> Result<Option<ItemRow>, StoreError> {
        Ok(inventory_db::items::update(&self.pool, id, params).await?)
    }

    async fn delete_item(&self, id: i64) -> Result<bool, StoreError> {
        Ok(inventory_db::items::delete(&self.pool, id).await?)
    }
}
