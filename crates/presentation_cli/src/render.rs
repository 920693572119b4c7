//! Console rendering of sensors and classifications

use application::{SensorReading, StationSensor};
use domain::{SensorDescription, SensorProperties, SensorValue};
use serde::Serialize;

/// One sensor's state, as printed by `run --json`
#[derive(Debug, Serialize)]
pub struct SensorStateView<'a> {
    /// Unique id
    pub unique_id: &'a str,
    /// Display name
    pub name: &'a str,
    /// Current value, `null` when absent
    pub value: Option<SensorValue>,
    /// Whether the last refresh succeeded
    pub available: bool,
    /// Display metadata
    #[serde(flatten)]
    pub properties: SensorProperties,
}

impl<'a> SensorStateView<'a> {
    /// Capture the current state of `sensor`
    #[must_use]
    pub fn of(sensor: &'a StationSensor) -> Self {
        let reading = sensor.reading();
        Self {
            unique_id: sensor.unique_id(),
            name: sensor.name(),
            value: reading.value,
            available: reading.available,
            properties: sensor.description().properties,
        }
    }
}

/// `name: state unit` line for one sensor
#[must_use]
pub fn sensor_line(sensor: &StationSensor) -> String {
    line_for_reading(sensor, &sensor.reading())
}

fn line_for_reading(sensor: &StationSensor, reading: &SensorReading) -> String {
    let state = reading.state();
    match sensor.unit() {
        Some(unit) if reading.available && reading.value.is_some() => {
            format!("{}: {state} {}", sensor.name(), unit.symbol())
        },
        _ => format!("{}: {state}", sensor.name()),
    }
}

/// Classification of one key as a single line
#[must_use]
pub fn classification_line(description: &SensorDescription) -> String {
    let props = &description.properties;
    if props.is_empty() {
        return format!("{} ({}): no classification", description.key, description.name);
    }

    let device_class = props.device_class.map_or("-", |c| c.as_str());
    let unit = props.unit.map_or("-", |u| u.symbol());
    let state_class = props.state_class.map_or("-", |s| s.as_str());
    format!(
        "{} ({}): device_class={device_class} unit={unit} state_class={state_class}",
        description.key, description.name
    )
}
