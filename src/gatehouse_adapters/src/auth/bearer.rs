use http::{HeaderMap, header::AUTHORIZATION};
use thiserror::Error;

use gatehouse_core::UserId;

use super::token_service::JwtTokenService;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessAuthError {
    #[error("Unauthorized")]
    Missing,
    #[error("Invalid or expired token")]
    Invalid,
}

/// Resolves the caller from an `Authorization: Bearer <token>` header.
pub fn authenticated_user(
    headers: &HeaderMap,
    tokens: &JwtTokenService,
) -> Result<UserId, AccessAuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AccessAuthError::Missing)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AccessAuthError::Missing)?;

    tokens
        .verify_access(token)
        .map_err(|_| AccessAuthError::Invalid)
}
