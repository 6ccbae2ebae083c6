use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerificationCodeError {
    #[error("Code must be 6 digits")]
    WrongLength,
    #[error("Code must contain only digits")]
    NonDigit,
}

/// A 6-digit one-time verification code delivered out-of-band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Generate a uniformly random code; each of the 10^6 values is equally
    /// likely, leading zeros included.
    pub fn new() -> Self {
        let value = rand::rng().random_range(0..1_000_000u32);
        Self(format!("{value:06}"))
    }

    pub fn parse(candidate: String) -> Result<Self, VerificationCodeError> {
        if candidate.len() != 6 {
            return Err(VerificationCodeError::WrongLength);
        }
        if !candidate.chars().all(|c| c.is_ascii_digit()) {
            return Err(VerificationCodeError::NonDigit);
        }
        Ok(Self(candidate))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for VerificationCode {
    fn default() -> Self {
        Self::new()
    }
}
