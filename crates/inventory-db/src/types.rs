use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;

/// Item row returned from SELECT / RETURNING queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ItemRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub quantity: i32,
}

/// User row, including the stored password hash
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub date_joined: DateTime<Utc>,
}

pub struct CreateUserParams {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

pub struct CreateItemParams {
    pub name: String,
    pub description: String,
    pub quantity: i32,
}

/// Field changes for an item update; `None` leaves the column unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateItemParams {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
}

impl UpdateItemParams {
    /// Apply the changes to an existing row
    pub fn apply_to(&self, row: &mut ItemRow) {
        if let Some(name) = &self.name {
            row.name = name.clone();
        }
        if let Some(description) = &self.description {
            row.description = description.clone();
        }
        if let Some(quantity) = self.quantity {
            row.quantity = quantity;
        }
    }
}
