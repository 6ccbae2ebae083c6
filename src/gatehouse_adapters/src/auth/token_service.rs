use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use gatehouse_core::UserId;

#[derive(Debug, Error)]
pub enum TokenError {
    /// Bad signature, malformed structure and expiry all collapse into this
    /// one kind; callers must not learn which check failed.
    #[error("Invalid or expired token")]
    Invalid,
    #[error("Failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
}

struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: i64,
}

impl TokenSigner {
    fn new(secret: &Secret<String>, ttl_seconds: i64) -> Self {
        let secret = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl_seconds,
        }
    }

    fn sign(&self, user_id: &UserId) -> Result<String, TokenError> {
        let delta = chrono::Duration::try_seconds(self.ttl_seconds).ok_or(
            TokenError::UnexpectedError("Failed to create token duration".to_string()),
        )?;

        let exp = Utc::now()
            .checked_add_signed(delta)
            .ok_or(TokenError::UnexpectedError(
                "Duration out of range".to_string(),
            ))?
            .timestamp();

        let exp: usize = exp
            .try_into()
            .map_err(|_| TokenError::UnexpectedError("Failed to cast i64 to usize".to_string()))?;

        let claims = Claims {
            sub: user_id.to_string(),
            exp,
        };

        encode(&jsonwebtoken::Header::default(), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| TokenError::Invalid)?;

        UserId::parse(&claims.sub).map_err(|_| TokenError::Invalid)
    }
}

/// Issues and verifies the two token kinds. Access and refresh tokens use
/// independent secret material so that compromise of one does not compromise
/// the other; neither token is persisted server-side.
pub struct JwtTokenService {
    access: TokenSigner,
    refresh: TokenSigner,
}

impl JwtTokenService {
    pub fn new(
        access_secret: &Secret<String>,
        access_ttl_seconds: i64,
        refresh_secret: &Secret<String>,
        refresh_ttl_seconds: i64,
    ) -> Self {
        Self {
            access: TokenSigner::new(access_secret, access_ttl_seconds),
            refresh: TokenSigner::new(refresh_secret, refresh_ttl_seconds),
        }
    }

    pub fn sign_access(&self, user_id: &UserId) -> Result<String, TokenError> {
        self.access.sign(user_id)
    }

    pub fn sign_refresh(&self, user_id: &UserId) -> Result<String, TokenError> {
        self.refresh.sign(user_id)
    }

    pub fn verify_access(&self, token: &str) -> Result<UserId, TokenError> {
        self.access.verify(token)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<UserId, TokenError> {
        self.refresh.verify(token)
    }
}
