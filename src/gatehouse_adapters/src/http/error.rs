use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use gatehouse_application::{
    ChangePasswordError, LoginError, RegisterError, RequestPasswordChangeError,
    UpdateProfileError, VerifyTwoFaError,
};
use gatehouse_core::{UserStoreError, VerificationCodeStoreError};

use crate::auth::{bearer::AccessAuthError, token_service::TokenError};

use super::validation::FieldError;

/// Uniform error body. `errors` only appears on validation failures.
#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    pub fn new(message: String, errors: Option<Vec<FieldError>>) -> Self {
        Self {
            status: "error".to_string(),
            message,
            errors,
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Email or mobile already in use")]
    DuplicateIdentity,

    #[error("Validation failed")]
    ValidationFailed(Vec<FieldError>),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidAccessToken,

    #[error("Invalid or expired 2FA code")]
    InvalidTwoFaCode,

    #[error("Invalid or expired code")]
    InvalidPasswordChangeCode,

    /// The refresh cookie is absent.
    #[error("Invalid session")]
    MissingSession,

    /// The refresh cookie is present but does not verify.
    #[error("Invalid refresh token")]
    InvalidSession,

    #[error("User not found")]
    UserNotFound,

    #[error("Something went wrong")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Internal detail is logged server-side only; the body stays generic.
        if let ApiError::Internal(detail) = &self {
            tracing::error!(error = %detail, "request failed");
        }

        let status_code = match &self {
            ApiError::DuplicateIdentity | ApiError::ValidationFailed(_) => StatusCode::BAD_REQUEST,

            ApiError::InvalidCredentials
            | ApiError::Unauthorized
            | ApiError::InvalidAccessToken
            | ApiError::InvalidTwoFaCode
            | ApiError::InvalidPasswordChangeCode
            | ApiError::MissingSession => StatusCode::UNAUTHORIZED,

            ApiError::InvalidSession => StatusCode::FORBIDDEN,

            ApiError::UserNotFound => StatusCode::NOT_FOUND,

            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = self.to_string();
        let errors = match self {
            ApiError::ValidationFailed(fields) => Some(fields),
            _ => None,
        };

        (status_code, Json(ErrorResponse::new(message, errors))).into_response()
    }
}

impl From<UserStoreError> for ApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::DuplicateIdentity => ApiError::DuplicateIdentity,
            UserStoreError::UserNotFound => ApiError::UserNotFound,
            UserStoreError::IncorrectPassword => ApiError::InvalidCredentials,
            UserStoreError::Unexpected(e) => ApiError::Internal(e),
        }
    }
}

impl From<VerificationCodeStoreError> for ApiError {
    fn from(error: VerificationCodeStoreError) -> Self {
        match error {
            VerificationCodeStoreError::Unexpected(e) => ApiError::Internal(e),
        }
    }
}

impl From<AccessAuthError> for ApiError {
    fn from(error: AccessAuthError) -> Self {
        match error {
            AccessAuthError::Missing => ApiError::Unauthorized,
            AccessAuthError::Invalid => ApiError::InvalidAccessToken,
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Invalid => ApiError::InvalidAccessToken,
            TokenError::Signing(e) => ApiError::Internal(e.to_string()),
            TokenError::UnexpectedError(e) => ApiError::Internal(e),
        }
    }
}

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::DuplicateIdentity => ApiError::DuplicateIdentity,
            RegisterError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::InvalidCredentials => ApiError::InvalidCredentials,
            LoginError::UserStoreError(e) => e.into(),
            LoginError::CodeStoreError(e) => e.into(),
            LoginError::SmsError(e) => ApiError::Internal(e),
        }
    }
}

impl From<VerifyTwoFaError> for ApiError {
    fn from(error: VerifyTwoFaError) -> Self {
        match error {
            VerifyTwoFaError::InvalidOrExpiredCode => ApiError::InvalidTwoFaCode,
            VerifyTwoFaError::CodeStoreError(e) => e.into(),
        }
    }
}

impl From<RequestPasswordChangeError> for ApiError {
    fn from(error: RequestPasswordChangeError) -> Self {
        match error {
            RequestPasswordChangeError::UserNotFound => ApiError::UserNotFound,
            RequestPasswordChangeError::UserStoreError(e) => e.into(),
            RequestPasswordChangeError::CodeStoreError(e) => e.into(),
            RequestPasswordChangeError::SmsError(e) => ApiError::Internal(e),
        }
    }
}

impl From<ChangePasswordError> for ApiError {
    fn from(error: ChangePasswordError) -> Self {
        match error {
            ChangePasswordError::InvalidOrExpiredCode => ApiError::InvalidPasswordChangeCode,
            ChangePasswordError::UserNotFound => ApiError::UserNotFound,
            ChangePasswordError::UserStoreError(e) => e.into(),
            ChangePasswordError::CodeStoreError(e) => e.into(),
        }
    }
}

impl From<UpdateProfileError> for ApiError {
    fn from(error: UpdateProfileError) -> Self {
        match error {
            UpdateProfileError::DuplicateIdentity => ApiError::DuplicateIdentity,
            UpdateProfileError::UserNotFound => ApiError::UserNotFound,
            UpdateProfileError::UserStoreError(e) => e.into(),
        }
    }
}
