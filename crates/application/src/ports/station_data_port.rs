//! Station data port
//!
//! Defines the interface for retrieving the latest station record.

use async_trait::async_trait;
use domain::Snapshot;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for fetching the most recent station snapshot
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StationDataPort: Send + Sync {
    /// Fetch the latest record as an immutable snapshot
    ///
    /// Transport failures, non-200 answers and malformed payloads are all
    /// reported as `ApplicationError::FetchFailed`.
    async fn fetch_snapshot(&self) -> Result<Snapshot, ApplicationError>;
}
