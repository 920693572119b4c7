//! Domain entities

mod sensor_description;
mod snapshot;

pub use sensor_description::{SensorDescription, friendly_name};
pub use snapshot::Snapshot;
