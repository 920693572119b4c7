//! Logging infrastructure
//!
//! Installs the global `tracing` subscriber: an `EnvFilter` plus either the
//! human-readable or the JSON formatter.

mod subscriber;

pub use subscriber::{TelemetryConfig, TelemetryError, init_telemetry};
