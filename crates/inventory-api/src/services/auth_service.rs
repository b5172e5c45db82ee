//! Registration and login.

use std::fmt;
use std::sync::Arc;

use inventory_db::CreateUserParams;
use serde::Serialize;
use tracing::{info, warn};
use ts_rs::TS;

use crate::password;
use crate::store::{StoreError, UserStore};
use crate::token::TokenIssuer;
use crate::validation;

#[derive(Debug)]
pub enum AuthError {
    DuplicateUsername,
    InvalidCredentials,
    Validation(String),
    Internal(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::DuplicateUsername => write!(f, "Username already exists"),
            AuthError::InvalidCredentials => write!(f, "Invalid credentials"),
            AuthError::Validation(msg) => write!(f, "Validation error: {msg}"),
            AuthError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict => AuthError::DuplicateUsername,
            StoreError::Database(e) => AuthError::Internal(e.to_string()),
        }
    }
}

/// Public fields of a registered user (the password hash never leaves the service)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RegisteredUser {
    pub username: String,
    pub email: String,
}

pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: Arc<TokenIssuer>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: Arc<TokenIssuer>) -> Self {
        Self { users, tokens }
    }

    /// Create a user with a hashed password
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<RegisteredUser, AuthError> {
        info!(username, "Creating user");

        validation::validate_username(username).map_err(AuthError::Validation)?;
        validation::validate_email(email).map_err(AuthError::Validation)?;
        validation::validate_not_blank(password, "password").map_err(AuthError::Validation)?;

        if self.users.get_user_by_username(username).await?.is_some() {
            warn!(username, "Registration rejected: username taken");
            return Err(AuthError::DuplicateUsername);
        }

        let password_hash = hash_in_background(password.to_string()).await?;
        let row = self
            .users
            .create_user(&CreateUserParams {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        info!(username = %row.username, user_id = row.id, "User created");
        Ok(RegisteredUser {
            username: row.username,
            email: row.email,
        })
    }

    /// Check credentials and issue an access token
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        info!(username, "Validating login");

        let Some(user) = self.users.get_user_by_username(username).await? else {
            warn!(username, "Invalid login credentials");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_in_background(password.to_string(), user.password_hash).await? {
            warn!(username, "Invalid login credentials");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(&user.username)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        info!(username, "User logged in");
        Ok(token)
    }
}

// Argon2 is deliberately slow; keep it off the async worker threads.
async fn hash_in_background(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))?
        .map_err(|e| AuthError::Internal(e.to_string()))
}

async fn verify_in_background(password: String, hash: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || password::verify_password(&password, &hash))
        .await
        .map_err(|e| AuthError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::time::Duration;

    fn service() -> (AuthService, Arc<TokenIssuer>) {
        let tokens = Arc::new(TokenIssuer::new(b"test-secret", Duration::from_secs(300)));
        let service = AuthService::new(Arc::new(MemoryStore::new()), tokens.clone());
        (service, tokens)
    }

    #[tokio::test]
    async fn test_register_returns_public_fields() {
        let (service, _) = service();
        let user = service.register("alice", "a@x.com", "pw123456").await.unwrap();

        assert_eq!(
            user,
            RegisteredUser {
                username: "alice".to_string(),
                email: "a@x.com".to_string(),
            }
        );
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let (service, _) = service();
        service.register("alice", "a@x.com", "pw123456").await.unwrap();

        let err = service
            .register("alice", "other@x.com", "different")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUsername));
    }

    #[tokio::test]
    async fn test_register_validates_fields() {
        let (service, _) = service();

        let err = service.register("bad name", "a@x.com", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(msg) if msg.starts_with("username:")));

        let err = service.register("alice", "nope", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(msg) if msg.starts_with("email:")));

        let err = service.register("alice", "a@x.com", "").await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(msg) if msg.starts_with("password:")));
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let (service, tokens) = service();
        service.register("alice", "a@x.com", "pw123456").await.unwrap();

        let token = service.login("alice", "pw123456").await.unwrap();
        assert_eq!(tokens.verify(&token).unwrap().sub, "alice");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (service, _) = service();
        service.register("alice", "a@x.com", "pw123456").await.unwrap();

        let err = service.login("alice", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let (service, _) = service();
        let err = service.login("ghost", "pw123456").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }
}
