use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;
use crate::token::TokenIssuer;

const NOT_PROVIDED: &str = "Authentication credentials were not provided.";
const INVALID_TOKEN: &str = "Given token not valid for any token type";

/// A caller whose bearer token has been verified.
///
/// Item service operations take an `&Actor`, so holding one is proof that
/// authentication already happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub(crate) username: String,
}

impl Actor {
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Verify a raw `Authorization` header value
    pub fn from_authorization(header: Option<&str>, tokens: &TokenIssuer) -> Result<Self, AppError> {
        let header = header.ok_or_else(|| AppError::Unauthenticated(NOT_PROVIDED.into()))?;

        let mut parts = header.split_whitespace();
        match parts.next() {
            Some(scheme) if scheme.eq_ignore_ascii_case("bearer") => {}
            _ => return Err(AppError::Unauthenticated(NOT_PROVIDED.into())),
        }
        let token = match (parts.next(), parts.next()) {
            (Some(token), None) => token,
            _ => {
                return Err(AppError::Unauthenticated(
                    "Authorization header must contain two space-delimited values".into(),
                ))
            }
        };

        let claims = tokens.verify(token).map_err(|e| {
            warn!(error = %e, "Rejected access token");
            AppError::Unauthenticated(INVALID_TOKEN.into())
        })?;

        Ok(Actor {
            username: claims.sub,
        })
    }
}

/// Axum extractor that validates the bearer token and returns an [`Actor`].
///
/// Use this as the first handler parameter to require authentication; a
/// failure rejects the request before any store or cache access:
///
/// ```ignore
/// async fn my_handler(actor: Actor, ...) -> Result<..., AppError> { ... }
/// ```
impl FromRequestParts<AppState> for Actor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        Actor::from_authorization(header, &state.tokens)
    }
}
