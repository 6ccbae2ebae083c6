use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email,
    mobile::Mobile,
    password::Password,
    user::{NewUser, ProfileUpdate, User, UserId},
    verification_code::VerificationCode,
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("Email or mobile already in use")]
    DuplicateIdentity,
    #[error("User not found")]
    UserNotFound,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::DuplicateIdentity, Self::DuplicateIdentity)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::IncorrectPassword, Self::IncorrectPassword)
                | (Self::Unexpected(_), Self::Unexpected(_))
        )
    }
}

/// Credential store. Owns identity records; the plaintext password never
/// leaves this boundary unhashed.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a record, hashing the password first. Fails with
    /// `DuplicateIdentity` when the email or mobile is already taken.
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError>;

    async fn find_by_email_or_mobile(
        &self,
        email: &Email,
        mobile: &Mobile,
    ) -> Result<Option<User>, UserStoreError>;

    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError>;

    /// Look up by email and verify the candidate against the stored hash
    /// (constant-time adaptive-hash compare). `UserNotFound` and
    /// `IncorrectPassword` stay distinct here; the login flow collapses them.
    async fn authenticate(&self, email: &Email, password: &Password)
    -> Result<User, UserStoreError>;

    /// Apply a profile update. Mobile is not representable in
    /// `ProfileUpdate`; a changed email that collides with another record
    /// fails with `DuplicateIdentity`.
    async fn update_profile(
        &self,
        id: &UserId,
        update: ProfileUpdate,
    ) -> Result<(), UserStoreError>;

    async fn set_new_password(
        &self,
        id: &UserId,
        new_password: Password,
    ) -> Result<(), UserStoreError>;
}

// Stores are shared across handlers behind Arc.
#[async_trait]
impl<T: UserStore + ?Sized> UserStore for std::sync::Arc<T> {
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        (**self).add_user(new_user).await
    }

    async fn find_by_email_or_mobile(
        &self,
        email: &Email,
        mobile: &Mobile,
    ) -> Result<Option<User>, UserStoreError> {
        (**self).find_by_email_or_mobile(email, mobile).await
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError> {
        (**self).find_by_id(id).await
    }

    async fn authenticate(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError> {
        (**self).authenticate(email, password).await
    }

    async fn update_profile(
        &self,
        id: &UserId,
        update: ProfileUpdate,
    ) -> Result<(), UserStoreError> {
        (**self).update_profile(id, update).await
    }

    async fn set_new_password(
        &self,
        id: &UserId,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        (**self).set_new_password(id, new_password).await
    }
}

// VerificationCodeStore port trait and errors
#[derive(Debug, Error)]
pub enum VerificationCodeStoreError {
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Short-lived one-time-code store. The store is the sole authority on a
/// code's validity window; callers never see the TTL.
#[async_trait]
pub trait VerificationCodeStore: Send + Sync {
    /// Store a freshly generated code under the user's identity, overwriting
    /// any prior unconsumed code and restarting the TTL.
    async fn store_code(
        &self,
        user_id: &UserId,
        code: VerificationCode,
    ) -> Result<(), VerificationCodeStoreError>;

    /// Read the live code, if any. An expired code reads as absent.
    async fn peek(
        &self,
        user_id: &UserId,
    ) -> Result<Option<VerificationCode>, VerificationCodeStoreError>;

    /// Atomic get-compare-delete. Returns false when no live code exists or
    /// the candidate does not match (the code is kept for retries within the
    /// TTL), true exactly once for a matching candidate. Two concurrent calls
    /// with the correct code must not both succeed.
    async fn consume(
        &self,
        user_id: &UserId,
        candidate: &VerificationCode,
    ) -> Result<bool, VerificationCodeStoreError>;
}

#[async_trait]
impl<T: VerificationCodeStore + ?Sized> VerificationCodeStore for std::sync::Arc<T> {
    async fn store_code(
        &self,
        user_id: &UserId,
        code: VerificationCode,
    ) -> Result<(), VerificationCodeStoreError> {
        (**self).store_code(user_id, code).await
    }

    async fn peek(
        &self,
        user_id: &UserId,
    ) -> Result<Option<VerificationCode>, VerificationCodeStoreError> {
        (**self).peek(user_id).await
    }

    async fn consume(
        &self,
        user_id: &UserId,
        candidate: &VerificationCode,
    ) -> Result<bool, VerificationCodeStoreError> {
        (**self).consume(user_id, candidate).await
    }
}
