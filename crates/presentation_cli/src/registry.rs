//! In-process entity registry
//!
//! Keeps the sensors handed over at setup so the console can render them.

use std::sync::Arc;

use application::{ApplicationError, EntityRegistryPort, StationSensor};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

/// Registry holding the sensors of the running entry
#[derive(Debug, Default)]
pub struct ConsoleRegistry {
    sensors: RwLock<Vec<Arc<StationSensor>>>,
}

impl ConsoleRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered sensors in registration order
    pub async fn sensors(&self) -> Vec<Arc<StationSensor>> {
        self.sensors.read().await.clone()
    }
}

#[async_trait]
impl EntityRegistryPort for ConsoleRegistry {
    async fn add_entities(
        &self,
        sensors: Vec<Arc<StationSensor>>,
        update_before_add: bool,
    ) -> Result<(), ApplicationError> {
        // All sensors of an entry share one coordinator
        if update_before_add {
            if let Some(first) = sensors.first() {
                first.update().await;
            }
        }

        debug!(count = sensors.len(), "Registering sensors");
        self.sensors.write().await.extend(sensors);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use application::{StationCoordinator, StationDataPort};
    use domain::{MeasurementKey, SensorValue, Snapshot};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Port counting fetches and returning one temperature reading
    #[derive(Debug, Default)]
    struct CountingPort {
        fetches: AtomicUsize,
    }

    #[async_trait]
    impl StationDataPort for CountingPort {
        async fn fetch_snapshot(&self) -> Result<Snapshot, ApplicationError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let values = [(MeasurementKey::new("airtemp_01mnavg"), SensorValue::from(20.5))]
                .into_iter()
                .collect();
            Ok(Snapshot::new(values, chrono::Utc::now()))
        }
    }

    fn sensors(port: &Arc<CountingPort>, keys: &[&str]) -> Vec<Arc<StationSensor>> {
        let coordinator = Arc::new(StationCoordinator::new(
            "test",
            Arc::clone(port) as Arc<dyn StationDataPort>,
            Duration::from_secs(60),
        ));
        keys.iter()
            .map(|k| {
                Arc::new(StationSensor::new(
                    Arc::clone(&coordinator),
                    &MeasurementKey::new(*k),
                    "e",
                ))
            })
            .collect()
    }

    #[tokio::test]
    async fn registers_sensors_in_order() {
        let port = Arc::new(CountingPort::default());
        let registry = ConsoleRegistry::new();

        registry
            .add_entities(sensors(&port, &["airtemp_01mnavg", "relhumd_01mnavg"]), false)
            .await
            .unwrap();

        let registered = registry.sensors().await;
        assert_eq!(registered.len(), 2);
        assert_eq!(registered[1].unique_id(), "e-relhumd_01mnavg");
        assert_eq!(port.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn update_before_add_refreshes_once() {
        let port = Arc::new(CountingPort::default());
        let registry = ConsoleRegistry::new();

        registry
            .add_entities(sensors(&port, &["airtemp_01mnavg", "relhumd_01mnavg"]), true)
            .await
            .unwrap();

        assert_eq!(port.fetches.load(Ordering::SeqCst), 1);
        let registered = registry.sensors().await;
        assert_eq!(registered[0].native_value(), Some(SensorValue::from(20.5)));
    }
}
