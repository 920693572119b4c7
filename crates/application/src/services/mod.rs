//! Application services
//!
//! Use cases around one station entry: polling, sensor facades, the
//! config/options flows and entry setup.

pub mod config_flow;
pub mod coordinator;
pub mod sensor;
pub mod setup;

pub use config_flow::{
    ConfigEntry, ConfigFlow, ENTRY_TITLE, FlowForm, FlowResult, OptionsFlow, SettingsInput,
};
pub use coordinator::{CoordinatorState, StationCoordinator};
pub use sensor::{STATE_UNAVAILABLE, STATE_UNKNOWN, SensorReading, StationSensor};
pub use setup::{DEFAULT_EXCLUDED_KEYS, StationSetup, setup_entry};
