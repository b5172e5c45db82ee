use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use ts_rs::TS;

use crate::error::AppError;
use crate::routes::json_body;
use crate::services::RegisteredUser;
use crate::state::AppState;
use crate::validation::{required, trimmed};

#[derive(Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RegisterRequest {
    #[ts(optional)]
    username: Option<String>,
    #[ts(optional)]
    email: Option<String>,
    #[ts(optional)]
    password: Option<String>,
}

#[derive(Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LoginRequest {
    #[ts(optional)]
    username: Option<String>,
    #[ts(optional)]
    password: Option<String>,
}

#[derive(Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LoginResponse {
    token: String,
}

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisteredUser>), AppError> {
    let body = json_body(payload)?;
    info!(username = ?body.username, "User registration initiated");

    let username = required(trimmed(body.username), "username").map_err(AppError::Validation)?;
    let password = required(trimmed(body.password), "password").map_err(AppError::Validation)?;
    let email = trimmed(body.email).unwrap_or_default();

    let user = state.auth.register(&username, &email, &password).await?;

    info!(username = %user.username, "User registered successfully");
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let body = json_body(payload)?;
    info!(username = ?body.username, "Login attempt");

    let username = required(trimmed(body.username), "username").map_err(AppError::Validation)?;
    let password = required(trimmed(body.password), "password").map_err(AppError::Validation)?;

    let token = state.auth.login(&username, &password).await?;
    Ok(Json(LoginResponse { token }))
}

#[cfg(test)]
mod tests {
    use crate::routes::create_router;
    use crate::test_support::test_app;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn alice() -> Value {
        json!({"username": "alice", "email": "a@x.com", "password": "pw123456"})
    }

    #[tokio::test]
    async fn test_register_returns_201_without_password() {
        let router = create_router(test_app().state);

        let (status, json) = post_json(&router, "/register/", alice()).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json, json!({"username": "alice", "email": "a@x.com"}));
    }

    #[tokio::test]
    async fn test_register_duplicate_username_is_400() {
        let router = create_router(test_app().state);
        post_json(&router, "/register/", alice()).await;

        let (status, json) = post_json(&router, "/register/", alice()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["detail"],
            "username: A user with that username already exists."
        );
    }

    #[tokio::test]
    async fn test_register_missing_password_is_400() {
        let router = create_router(test_app().state);

        let (status, json) =
            post_json(&router, "/register/", json!({"username": "alice"})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["detail"], "password: This field is required.");
    }

    #[tokio::test]
    async fn test_register_malformed_json_is_400() {
        let router = create_router(test_app().state);
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/register/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let router = create_router(test_app().state);
        post_json(&router, "/register/", alice()).await;

        let (status, json) = post_json(
            &router,
            "/login/",
            json!({"username": "alice", "password": "pw123456"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(!json["token"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_login_bad_credentials_issue_no_token() {
        let router = create_router(test_app().state);
        post_json(&router, "/register/", alice()).await;

        for body in [
            json!({"username": "alice", "password": "wrong"}),
            json!({"username": "nobody", "password": "pw123456"}),
        ] {
            let (status, json) = post_json(&router, "/login/", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["detail"], "Invalid Credentials");
            assert!(json.get("token").is_none());
        }
    }

    #[tokio::test]
    async fn test_register_trims_fields() {
        let router = create_router(test_app().state);

        let (status, json) = post_json(
            &router,
            "/register/",
            json!({"username": " alice ", "email": " a@x.com ", "password": " pw123456 "}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json, json!({"username": "alice", "email": "a@x.com"}));

        let (status, _) = post_json(&router, "/register/", alice()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post_json(
            &router,
            "/login/",
            json!({"username": "alice ", "password": "pw123456"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_login_missing_username_is_400() {
        let router = create_router(test_app().state);

        let (status, json) = post_json(&router, "/login/", json!({"password": "pw"})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["detail"], "username: This field is required.");
    }
}
