use std::fmt;

use secrecy::Secret;
use thiserror::Error;
use uuid::Uuid;

use super::{email::Email, mobile::Mobile, password::Password};

#[derive(Debug, Error)]
pub enum UserIdError {
    #[error("Invalid user ID")]
    Invalid,
}

/// Opaque user identifier, a UUIDv4 under the hood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(candidate: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(candidate)
            .map(Self)
            .map_err(|_| UserIdError::Invalid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Error)]
pub enum UserNameError {
    #[error("Name is required")]
    Missing,
    #[error("Name must be at least 2 characters")]
    TooShort,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    pub fn parse(candidate: String) -> Result<Self, UserNameError> {
        if candidate.is_empty() {
            return Err(UserNameError::Missing);
        }
        if candidate.chars().count() < 2 {
            return Err(UserNameError::TooShort);
        }
        Ok(Self(candidate))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Registration input. The plaintext password travels only as far as the user
/// store, which hashes it before anything is written.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: UserName,
    pub email: Email,
    pub mobile: Mobile,
    pub password: Password,
}

/// A persisted identity record. The password hash stays behind `Secret` and
/// is only ever read by the store's own verification path.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    name: UserName,
    email: Email,
    mobile: Mobile,
    password_hash: Secret<String>,
}

impl User {
    pub fn new(
        id: UserId,
        name: UserName,
        email: Email,
        mobile: Mobile,
        password_hash: Secret<String>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            mobile,
            password_hash,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn mobile(&self) -> &Mobile {
        &self.mobile
    }

    pub fn password_hash(&self) -> &Secret<String> {
        &self.password_hash
    }
}

/// Mutable profile fields. Mobile is deliberately not representable here;
/// changing it would break the 2FA delivery channel.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<UserName>,
    pub email: Option<Email>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}
