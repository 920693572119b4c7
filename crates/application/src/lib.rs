//! Application layer - Use cases and orchestration
//!
//! Contains the polling coordinator, the per-key sensor facades, the
//! config/options flows and the port definitions the infrastructure layer
//! implements.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
