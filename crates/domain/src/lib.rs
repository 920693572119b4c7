//! Domain layer for the WSWR weather station bridge
//!
//! Contains the measurement vocabulary (keys, values, snapshots), the
//! unit/device-class classifier and domain errors. This layer performs no I/O.

pub mod classifier;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use classifier::{DeviceClass, SensorProperties, StateClass, UnitOfMeasurement, classify};
pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
