//! Entity registry port
//!
//! The host side that takes ownership of the sensors created at setup.

use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;
use crate::services::StationSensor;

/// Port for registering sensors with the host
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EntityRegistryPort: Send + Sync {
    /// Register the sensors of one entry
    ///
    /// With `update_before_add` the host refreshes the sensors once before
    /// publishing their first state.
    async fn add_entities(
        &self,
        sensors: Vec<Arc<StationSensor>>,
        update_before_add: bool,
    ) -> Result<(), ApplicationError>;
}
