//! Latest station reading
//!
//! A snapshot is built once per successful fetch and never mutated
//! afterwards. Consumers hold it behind an `Arc` and replace it wholesale.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::DomainError;
use crate::value_objects::{MeasurementKey, SensorValue};

/// Immutable key → value mapping of one station record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    values: BTreeMap<MeasurementKey, SensorValue>,
    fetched_at: DateTime<Utc>,
}

impl Snapshot {
    /// Create a snapshot from already-typed values
    #[must_use]
    pub fn new(values: BTreeMap<MeasurementKey, SensorValue>, fetched_at: DateTime<Utc>) -> Self {
        Self { values, fetched_at }
    }

    /// Build a snapshot from a flat JSON object
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidReading` if any field is an array or object.
    pub fn from_json_object(
        object: Map<String, Value>,
        fetched_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let values = object
            .into_iter()
            .map(|(key, value)| {
                let value = SensorValue::from_json(&key, value)?;
                Ok((MeasurementKey::new(key), value))
            })
            .collect::<Result<BTreeMap<_, _>, DomainError>>()?;

        Ok(Self { values, fetched_at })
    }

    /// Value at `key`, if present
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SensorValue> {
        self.values.get(key)
    }

    /// Check whether `key` is present
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &MeasurementKey> {
        self.values.keys()
    }

    /// Key/value pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&MeasurementKey, &SensorValue)> {
        self.values.iter()
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the record has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// When the record was fetched
    #[must_use]
    pub const fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }
}
