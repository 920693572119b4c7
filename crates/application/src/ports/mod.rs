//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer and the host
//! implement these ports.

mod entity_registry_port;
mod station_data_port;

pub use entity_registry_port::EntityRegistryPort;
#[cfg(test)]
pub use entity_registry_port::MockEntityRegistryPort;
#[cfg(test)]
pub use station_data_port::MockStationDataPort;
pub use station_data_port::StationDataPort;
