//! WSWR weather station integration
//!
//! Client for a station endpoint returning its most recent record as JSON,
//! either as a single object or as a list whose first element is the latest.

pub mod client;
mod models;

pub use client::{HttpStationClient, StationClient, StationConfig, StationError};
pub use models::{LatestRecord, StationPayload};
