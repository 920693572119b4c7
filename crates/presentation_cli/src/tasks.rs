//! Background refresh task
//!
//! Drives the coordinator at its configured interval.

use std::sync::Arc;
use std::time::Duration;

use application::StationCoordinator;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Spawn a background task that refreshes the coordinator every `interval`.
///
/// The first tick completes immediately and is skipped, since setup has
/// just fetched. Abort the returned handle to stop polling.
pub fn spawn_refresh_task(
    coordinator: Arc<StationCoordinator>,
    interval: Duration,
) -> JoinHandle<()> {
    info!(
        interval_secs = interval.as_secs(),
        coordinator = %coordinator.name(),
        "Starting station refresh task"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            ticker.tick().await;
            debug!("Scheduled station refresh");
            coordinator.request_refresh().await;
        }
    })
}
