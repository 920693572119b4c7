//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// A reading carried a value that is not a scalar
    #[error("Invalid reading for '{key}': {reason}")]
    InvalidReading { key: String, reason: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create an invalid reading error
    pub fn invalid_reading(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidReading {
            key: key.into(),
            reason: reason.into(),
        }
    }
}
