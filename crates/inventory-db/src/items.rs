use crate::types::{CreateItemParams, ItemRow, UpdateItemParams};
use sqlx::PgPool;

/// Insert a new item and return the stored row
pub async fn create(pool: &PgPool, p: &CreateItemParams) -> Result<ItemRow, sqlx::Error> {
    sqlx::query_as::<_, ItemRow>(
        r#"
        INSERT INTO items (name, description, quantity)
        VALUES ($1, $2, $3)
        RETURNING id, name, description, quantity
        "#,
    )
    .bind(&p.name)
    .bind(&p.description)
    .bind(p.quantity)
    .fetch_one(pool)
    .await
}

/// Get a single item by id
pub async fn get(pool: &PgPool, id: i64) -> Result<Option<ItemRow>, sqlx::Error> {
    sqlx::query_as::<_, ItemRow>(
        "SELECT id, name, description, quantity FROM items WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Get all items, oldest first
pub async fn list(pool: &PgPool) -> Result<Vec<ItemRow>, sqlx::Error> {
    sqlx::query_as::<_, ItemRow>(
        "SELECT id, name, description, quantity FROM items ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await
}

/// Apply field changes to an item. Returns `None` if the item does not exist.
pub async fn update(
    pool: &PgPool,
    id: i64,
    p: &UpdateItemParams,
) -> Result<Option<ItemRow>, sqlx::Error> {
    sqlx::query_as::<_, ItemRow>(
        r#"
        UPDATE items SET
            name = COALESCE($2, name),
            description = COALESCE($3, description),
            quantity = COALESCE($4, quantity)
        WHERE id = $1
        RETURNING id, name, description, quantity
        "#,
    )
    .bind(id)
    .bind(&p.name)
    .bind(&p.description)
    .bind(p.quantity)
    .fetch_optional(pool)
    .await
}

/// Delete an item. Returns whether a row was removed.
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM items WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
