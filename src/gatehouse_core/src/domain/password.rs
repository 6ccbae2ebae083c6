use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password is required")]
    Missing,
    #[error("Password must be at least 8 characters")]
    TooShort,
    #[error("Must contain at least one uppercase letter")]
    MissingUppercase,
    #[error("Must contain at least one lowercase letter")]
    MissingLowercase,
    #[error("Must contain at least one number")]
    MissingDigit,
}

/// A plaintext password in transit. Never stored; the user store hashes it
/// before anything is persisted.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    /// Parse a password candidate for login. Only non-emptiness is checked so
    /// that accounts created under older policies can still authenticate.
    pub fn parse(candidate: Secret<String>) -> Result<Self, PasswordError> {
        if candidate.expose_secret().is_empty() {
            return Err(PasswordError::Missing);
        }
        Ok(Self(candidate))
    }

    /// Parse a password for account creation or password change, enforcing
    /// the full complexity policy.
    pub fn parse_new(candidate: Secret<String>) -> Result<Self, PasswordError> {
        let value = candidate.expose_secret();
        if value.is_empty() {
            return Err(PasswordError::Missing);
        }
        if value.chars().count() < 8 {
            return Err(PasswordError::TooShort);
        }
        if !value.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(PasswordError::MissingUppercase);
        }
        if !value.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(PasswordError::MissingLowercase);
        }
        if !value.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordError::MissingDigit);
        }
        Ok(Self(candidate))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
