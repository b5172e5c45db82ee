//! Item endpoints. Every handler takes an [`Actor`] first, so unauthenticated
//! requests are rejected before the body is read or any store/cache access.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use inventory_db::ItemRow;
use serde::{Deserialize, Deserializer};
use ts_rs::TS;

use crate::auth::Actor;
use crate::error::AppError;
use crate::routes::{item_id, json_body};
use crate::services::{ItemFields, UpdateMode};
use crate::state::AppState;

#[derive(Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ItemRequest {
    #[ts(optional)]
    name: Option<String>,
    #[ts(optional)]
    description: Option<String>,
    #[serde(default, deserialize_with = "integer_or_numeric_string")]
    #[ts(optional)]
    quantity: Option<i32>,
}

/// Accept `5` or `"5"`, the way form-style clients send integers
fn integer_or_numeric_string<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Quantity {
        Integer(i32),
        Text(String),
    }

    match Option::<Quantity>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Quantity::Integer(n)) => Ok(Some(n)),
        Some(Quantity::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom("quantity: A valid integer is required.")),
    }
}

impl From<ItemRequest> for ItemFields {
    fn from(req: ItemRequest) -> Self {
        ItemFields {
            name: req.name,
            description: req.description,
            quantity: req.quantity,
        }
    }
}

pub async fn create_item(
    actor: Actor,
    State(state): State<AppState>,
    payload: Result<Json<ItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ItemRow>), AppError> {
    let body = json_body(payload)?;
    let item = state.items.create(&actor, body.into()).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn list_items(
    actor: Actor,
    State(state): State<AppState>,
) -> Result<Json<Vec<ItemRow>>, AppError> {
    Ok(Json(state.items.list(&actor).await?))
}

pub async fn get_item(
    actor: Actor,
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ItemRow>, AppError> {
    let id = item_id(path)?;
    Ok(Json(state.items.get(&actor, id).await?))
}

/// PUT: full replacement
pub async fn replace_item(
    actor: Actor,
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ItemRequest>, JsonRejection>,
) -> Result<Json<ItemRow>, AppError> {
    update(actor, state, path, payload, UpdateMode::Replace).await
}

/// PATCH: only the supplied fields
pub async fn patch_item(
    actor: Actor,
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ItemRequest>, JsonRejection>,
) -> Result<Json<ItemRow>, AppError> {
    update(actor, state, path, payload, UpdateMode::Partial).await
}

async fn update(
    actor: Actor,
    state: AppState,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ItemRequest>, JsonRejection>,
    mode: UpdateMode,
) -> Result<Json<ItemRow>, AppError> {
    let id = item_id(path)?;
    let body = json_body(payload)?;
    let item = state.items.update(&actor, id, body.into(), mode).await?;
    Ok(Json(item))
}

pub async fn delete_item(
    actor: Actor,
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = item_id(path)?;
    state.items.delete(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
