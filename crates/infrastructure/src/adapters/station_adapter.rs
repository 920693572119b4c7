//! Station adapter - Implements StationDataPort using integration_wswr

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::StationDataPort;
use async_trait::async_trait;
use chrono::Utc;
use domain::Snapshot;
use integration_wswr::{HttpStationClient, StationClient, StationConfig, StationError};
use tracing::{debug, instrument};

/// Adapter turning the latest station record into a snapshot
pub struct StationAdapter {
    client: Arc<dyn StationClient>,
}

impl std::fmt::Debug for StationAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StationAdapter")
            .field("client", &"<StationClient>")
            .finish()
    }
}

impl StationAdapter {
    /// Create an adapter backed by the HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: StationConfig) -> Result<Self, ApplicationError> {
        let client =
            HttpStationClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Create an adapter around any station client
    #[must_use]
    pub fn with_client(client: Arc<dyn StationClient>) -> Self {
        Self { client }
    }

    /// Every client failure is a failed fetch; the message keeps the cause
    fn map_error(err: &StationError) -> ApplicationError {
        debug!(error = %err, transient = err.is_transient(), "Station client error");
        ApplicationError::FetchFailed(err.to_string())
    }
}

#[async_trait]
impl StationDataPort for StationAdapter {
    #[instrument(skip(self))]
    async fn fetch_snapshot(&self) -> Result<Snapshot, ApplicationError> {
        let record = self
            .client
            .fetch_latest()
            .await
            .map_err(|e| Self::map_error(&e))?;

        Snapshot::from_json_object(record.into_fields(), Utc::now())
            .map_err(|e| ApplicationError::FetchFailed(format!("Malformed payload: {e}")))
    }
}
