//! Value Objects - Immutable, identity-less domain primitives

mod measurement_key;
mod sensor_value;
mod station_settings;

pub use measurement_key::MeasurementKey;
pub use sensor_value::SensorValue;
pub use station_settings::{
    DEFAULT_API_URL, DEFAULT_INTERVAL_MINUTES, MAX_INTERVAL_MINUTES, StationSettings,
};
