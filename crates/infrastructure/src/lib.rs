//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer and carries the
//! configuration and logging setup of the host.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, ConfigWriteError, OptionsAppConfig, StationAppConfig, write_options,
};
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
