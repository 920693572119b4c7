//! Entry setup
//!
//! Builds the coordinator for a config entry, performs the first fetch and
//! creates one sensor per key of that first snapshot.

use std::sync::Arc;

use tracing::{info, instrument};

use super::config_flow::ConfigEntry;
use super::coordinator::StationCoordinator;
use super::sensor::StationSensor;
use crate::error::ApplicationError;
use crate::ports::{EntityRegistryPort, StationDataPort};

/// Record metadata that never becomes a sensor
pub const DEFAULT_EXCLUDED_KEYS: &[&str] = &["id", "record_time"];

/// Coordinator and sensors of one set-up entry
///
/// Dropping the setup releases the coordinator once the host's refresh task
/// is aborted as well.
#[derive(Debug)]
pub struct StationSetup {
    /// Shared polling coordinator
    pub coordinator: Arc<StationCoordinator>,
    /// Sensors, in key order
    pub sensors: Vec<Arc<StationSensor>>,
}

/// Set up one station entry
///
/// Keys appearing in later snapshots are not picked up; the sensor set is
/// fixed here.
///
/// # Errors
///
/// Returns `ApplicationError::NotReady` if the first fetch fails (no sensors
/// are created) and any error the registry reports.
#[instrument(skip(entry, source, registry, excluded_keys), fields(entry_id = %entry.entry_id))]
pub async fn setup_entry(
    entry: &ConfigEntry,
    source: Arc<dyn StationDataPort>,
    registry: &dyn EntityRegistryPort,
    excluded_keys: &[String],
) -> Result<StationSetup, ApplicationError> {
    let settings = entry.effective_settings();
    let coordinator = Arc::new(StationCoordinator::new(
        entry.title.clone(),
        source,
        settings.interval(),
    ));

    let snapshot = coordinator.first_refresh().await?;

    let sensors: Vec<Arc<StationSensor>> = snapshot
        .keys()
        .filter(|key| !excluded_keys.iter().any(|excluded| excluded == key.as_str()))
        .map(|key| {
            Arc::new(StationSensor::new(
                Arc::clone(&coordinator),
                key,
                &entry.entry_id,
            ))
        })
        .collect();

    info!(
        sensors = sensors.len(),
        excluded = snapshot.len() - sensors.len(),
        interval_minutes = settings.interval_minutes,
        "Station entry set up"
    );

    registry.add_entities(sensors.clone(), true).await?;

    Ok(StationSetup {
        coordinator,
        sensors,
    })
}
