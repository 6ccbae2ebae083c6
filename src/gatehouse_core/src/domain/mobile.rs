use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

// International format, 8-15 digits, no leading zero after the plus.
static MOBILE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{7,14}$").expect("valid mobile regex"));

#[derive(Debug, Error)]
pub enum MobileError {
    #[error("Mobile number is required")]
    Missing,
    #[error("Invalid mobile number format. Use international format (+1234567890)")]
    InvalidFormat,
}

/// A validated mobile number. Whitespace is stripped before validation.
#[derive(Debug, Clone)]
pub struct Mobile(Secret<String>);

impl Mobile {
    pub fn parse(candidate: Secret<String>) -> Result<Self, MobileError> {
        let stripped: String = candidate
            .expose_secret()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if stripped.is_empty() {
            return Err(MobileError::Missing);
        }
        if !MOBILE_REGEX.is_match(&stripped) {
            return Err(MobileError::InvalidFormat);
        }
        Ok(Self(Secret::from(stripped)))
    }
}

impl TryFrom<Secret<String>> for Mobile {
    type Error = MobileError;

    fn try_from(candidate: Secret<String>) -> Result<Self, Self::Error> {
        Self::parse(candidate)
    }
}

impl AsRef<Secret<String>> for Mobile {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Mobile {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Mobile {}

impl Hash for Mobile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}
