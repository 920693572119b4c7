//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Fetching the latest station record failed
    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    /// The first fetch failed, so the entry cannot be set up yet
    #[error("Station not ready: {0}")]
    NotReady(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Registering entities with the host failed
    #[error("Registry error: {0}")]
    Registry(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
