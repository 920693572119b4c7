//! Station polling coordinator
//!
//! Owns the current snapshot for one station entry. Every refresh performs
//! exactly one fetch through the [`StationDataPort`]; the resulting state is
//! swapped in as a whole so readers never block and never observe a partial
//! update.

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use domain::{SensorValue, Snapshot};
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::StationDataPort;

/// Outcome of the most recent refresh together with the last good snapshot
#[derive(Debug, Clone, Default)]
pub struct CoordinatorState {
    snapshot: Option<Arc<Snapshot>>,
    last_update_success: bool,
    last_error: Option<String>,
    last_success_at: Option<DateTime<Utc>>,
}

impl CoordinatorState {
    /// Last successfully fetched snapshot
    #[must_use]
    pub fn snapshot(&self) -> Option<&Arc<Snapshot>> {
        self.snapshot.as_ref()
    }

    /// Whether the most recent refresh succeeded
    #[must_use]
    pub const fn last_update_success(&self) -> bool {
        self.last_update_success
    }

    /// Diagnostic of the most recent failed refresh
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Fetch time of the current snapshot
    #[must_use]
    pub const fn last_success_at(&self) -> Option<DateTime<Utc>> {
        self.last_success_at
    }
}

/// Polling coordinator for one station entry
pub struct StationCoordinator {
    name: String,
    source: Arc<dyn StationDataPort>,
    update_interval: Duration,
    state: ArcSwap<CoordinatorState>,
    in_flight: Mutex<()>,
    version: watch::Sender<u64>,
}

impl std::fmt::Debug for StationCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StationCoordinator")
            .field("name", &self.name)
            .field("source", &"<StationDataPort>")
            .field("update_interval", &self.update_interval)
            .field("state", &**self.state.load())
            .finish_non_exhaustive()
    }
}

impl StationCoordinator {
    /// Create a coordinator that has not fetched anything yet
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        source: Arc<dyn StationDataPort>,
        update_interval: Duration,
    ) -> Self {
        let (version, _) = watch::channel(0);
        Self {
            name: name.into(),
            source,
            update_interval,
            state: ArcSwap::from_pointee(CoordinatorState::default()),
            in_flight: Mutex::new(()),
            version,
        }
    }

    /// Coordinator name used in logs
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Interval between scheduled refreshes
    #[must_use]
    pub const fn update_interval(&self) -> Duration {
        self.update_interval
    }

    /// Fetch the latest record and replace the current snapshot
    ///
    /// On failure the previous snapshot is kept, the coordinator is marked
    /// as failed and the error is returned.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the station data port.
    #[instrument(skip(self), fields(coordinator = %self.name))]
    pub async fn refresh(&self) -> Result<Arc<Snapshot>, ApplicationError> {
        let _guard = self.in_flight.lock().await;

        let previous = self.state.load_full();
        let outcome = match self.source.fetch_snapshot().await {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                debug!(fields = snapshot.len(), "Station snapshot refreshed");
                if !previous.last_update_success && previous.snapshot.is_some() {
                    info!("Station data available again");
                }
                self.state.store(Arc::new(CoordinatorState {
                    snapshot: Some(Arc::clone(&snapshot)),
                    last_update_success: true,
                    last_error: None,
                    last_success_at: Some(snapshot.fetched_at()),
                }));
                Ok(snapshot)
            },
            Err(e) => {
                warn!(error = %e, "Error fetching station data");
                self.state.store(Arc::new(CoordinatorState {
                    snapshot: previous.snapshot.clone(),
                    last_update_success: false,
                    last_error: Some(e.to_string()),
                    last_success_at: previous.last_success_at,
                }));
                Err(e)
            },
        };

        self.version.send_modify(|v| *v = v.wrapping_add(1));
        outcome
    }

    /// Perform the eager refresh at setup
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::NotReady` if the fetch fails.
    pub async fn first_refresh(&self) -> Result<Arc<Snapshot>, ApplicationError> {
        self.refresh()
            .await
            .map_err(|e| ApplicationError::NotReady(e.to_string()))
    }

    /// Refresh and only log a failure
    ///
    /// The failure is still visible through [`Self::last_update_success`].
    pub async fn request_refresh(&self) {
        if let Err(e) = self.refresh().await {
            debug!(coordinator = %self.name, error = %e, "Requested refresh failed");
        }
    }

    /// Current state as one consistent value
    #[must_use]
    pub fn state(&self) -> Arc<CoordinatorState> {
        self.state.load_full()
    }

    /// Last successfully fetched snapshot
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.state.load().snapshot.clone()
    }

    /// Value at `key` in the current snapshot
    #[must_use]
    pub fn value(&self, key: &str) -> Option<SensorValue> {
        self.state
            .load()
            .snapshot
            .as_ref()
            .and_then(|snapshot| snapshot.get(key).cloned())
    }

    /// Whether the most recent refresh succeeded
    #[must_use]
    pub fn last_update_success(&self) -> bool {
        self.state.load().last_update_success
    }

    /// Subscribe to refresh notifications
    ///
    /// The counter is bumped after every refresh attempt, successful or not.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }
}
