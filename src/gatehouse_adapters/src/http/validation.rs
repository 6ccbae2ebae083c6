use serde::{Deserialize, Serialize};

use super::error::ApiError;

/// One rejected field in a validation failure response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

/// Collects per-field parse failures so a request reports all of them at
/// once instead of stopping at the first.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the error under `path` and pass the value through on success.
    pub fn check<T, E: std::fmt::Display>(
        &mut self,
        path: &str,
        result: Result<T, E>,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.errors.push(FieldError {
                    path: path.to_string(),
                    message: error.to_string(),
                });
                None
            }
        }
    }

    pub fn push(&mut self, path: &str, message: &str) {
        self.errors.push(FieldError {
            path: path.to_string(),
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn finish(self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::ValidationFailed(self.errors))
        }
    }

    pub fn into_error(self) -> ApiError {
        ApiError::ValidationFailed(self.errors)
    }
}
