//! Sensor facade
//!
//! One facade per measurement key. Facades never fetch on their own; they
//! read the coordinator's current snapshot and delegate updates to it.

use std::collections::BTreeMap;
use std::sync::Arc;

use domain::{
    DeviceClass, MeasurementKey, SensorDescription, SensorValue, StateClass, UnitOfMeasurement,
};

use super::coordinator::{CoordinatorState, StationCoordinator};

/// State string of a sensor whose coordinator's last refresh failed
pub const STATE_UNAVAILABLE: &str = "unavailable";

/// State string of a sensor without a value
pub const STATE_UNKNOWN: &str = "unknown";

/// Value and availability of one sensor, taken from a single coordinator state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensorReading {
    /// Current value, absent when the key is missing or `null`
    pub value: Option<SensorValue>,
    /// Whether the refresh that produced `state` succeeded
    pub available: bool,
}

impl SensorReading {
    /// State as shown to users
    #[must_use]
    pub fn state(&self) -> String {
        if !self.available {
            return STATE_UNAVAILABLE.to_string();
        }
        self.value
            .as_ref()
            .map_or_else(|| STATE_UNKNOWN.to_string(), ToString::to_string)
    }
}

/// Read-only view of one measurement key
#[derive(Debug)]
pub struct StationSensor {
    coordinator: Arc<StationCoordinator>,
    description: SensorDescription,
}

impl StationSensor {
    /// Create the sensor for `key`; metadata is derived once here
    #[must_use]
    pub fn new(coordinator: Arc<StationCoordinator>, key: &MeasurementKey, entry_id: &str) -> Self {
        Self {
            coordinator,
            description: SensorDescription::for_key(entry_id, key),
        }
    }

    /// Value and availability from one load of the coordinator state
    #[must_use]
    pub fn reading(&self) -> SensorReading {
        self.reading_from(&self.coordinator.state())
    }

    /// Value and availability as recorded in `state`
    #[must_use]
    pub fn reading_from(&self, state: &CoordinatorState) -> SensorReading {
        SensorReading {
            value: state
                .snapshot()
                .and_then(|snapshot| snapshot.get(self.description.key.as_str()).cloned())
                .filter(|value| !value.is_null()),
            available: state.last_update_success(),
        }
    }

    /// Current value, absent when the key is missing or `null`
    #[must_use]
    pub fn native_value(&self) -> Option<SensorValue> {
        self.reading().value
    }

    /// Whether the coordinator's most recent refresh succeeded
    #[must_use]
    pub fn available(&self) -> bool {
        self.coordinator.last_update_success()
    }

    /// State as shown to users
    #[must_use]
    pub fn state(&self) -> String {
        self.reading().state()
    }

    /// Refresh through the shared coordinator
    pub async fn update(&self) {
        self.coordinator.request_refresh().await;
    }

    /// Measurement key
    #[must_use]
    pub const fn key(&self) -> &MeasurementKey {
        &self.description.key
    }

    /// Display name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.description.name
    }

    /// Stable identifier
    #[must_use]
    pub fn unique_id(&self) -> &str {
        &self.description.unique_id
    }

    #[must_use]
    pub const fn device_class(&self) -> Option<DeviceClass> {
        self.description.device_class()
    }

    #[must_use]
    pub const fn unit(&self) -> Option<UnitOfMeasurement> {
        self.description.unit()
    }

    #[must_use]
    pub const fn state_class(&self) -> Option<StateClass> {
        self.description.state_class()
    }

    /// Static metadata
    #[must_use]
    pub const fn description(&self) -> &SensorDescription {
        &self.description
    }

    /// Extra attributes, `{"measurement": <key>}`
    #[must_use]
    pub fn extra_state_attributes(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(
            "measurement".to_string(),
            self.description.key.as_str().to_string(),
        )])
    }
}
