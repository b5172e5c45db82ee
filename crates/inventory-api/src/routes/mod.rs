pub mod health;
pub mod items;
pub mod users;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::routing::{get, post, put};
use axum::{Json, Router};

use crate::error::AppError;
use crate::state::AppState;

/// Create the HTTP router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(health::health))
        // Users
        .route("/register/", post(users::register))
        .route("/login/", post(users::login))
        // Items - static segments before `{id}`
        .route("/items/", get(items::list_items))
        .route("/items/create/", post(items::create_item))
        .route("/items/{id}/", get(items::get_item))
        .route(
            "/items/update/{id}/",
            put(items::replace_item).patch(items::patch_item),
        )
        .route(
            "/items/delete/{id}/",
            axum::routing::delete(items::delete_item),
        )
        .with_state(state)
}

/// Turn a JSON body rejection into a 400 with the parser's message
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}

/// Non-numeric ids match no item
pub(crate) fn item_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(id)| id)
        .map_err(|_| AppError::NotFound("Not found.".into()))
}
