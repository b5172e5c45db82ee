//! Signed access tokens (HS256 JWT) bound to a username.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

const ACCESS_TOKEN_TYPE: &str = "access";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Username of the authenticated user
    pub sub: String,
    pub token_type: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug)]
pub enum TokenError {
    Encode(jsonwebtoken::errors::Error),
    Invalid(jsonwebtoken::errors::Error),
    WrongType(String),
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::Encode(e) => write!(f, "Failed to sign token: {e}"),
            TokenError::Invalid(e) => write!(f, "Invalid token: {e}"),
            TokenError::WrongType(t) => write!(f, "Unexpected token type: {t}"),
        }
    }
}

impl std::error::Error for TokenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TokenError::Encode(e) | TokenError::Invalid(e) => Some(e),
            TokenError::WrongType(_) => None,
        }
    }
}

/// Issues and verifies access tokens with a shared secret.
///
/// Verification is stateless: it needs only the signing key, never a store lookup.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_secs: i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
        }
    }

    /// Issue an access token for `username`, valid for the configured window
    pub fn issue(&self, username: &str) -> Result<String, TokenError> {
        self.issue_at(username, Utc::now())
    }

    fn issue_at(&self, username: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let iat = now.timestamp();
        let claims = Claims {
            sub: username.to_string(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
            iat,
            exp: iat.saturating_add(self.ttl_secs),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Encode)
    }

    /// Verify signature, expiry and token type, returning the claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(TokenError::Invalid)?;

        if data.claims.token_type != ACCESS_TOKEN_TYPE {
            return Err(TokenError::WrongType(data.claims.token_type));
        }
        Ok(data.claims)
    }
}
