//! Station payload models
//!
//! The endpoint answers either with one flat record or with a list of
//! records ordered newest first. Both shapes normalize to [`LatestRecord`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::StationError;

/// Decoded response body before normalization
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StationPayload {
    /// List of records, newest first
    Records(Vec<Value>),
    /// A single record
    Record(Map<String, Value>),
}

impl StationPayload {
    /// Pick the most recent record
    ///
    /// # Errors
    ///
    /// Returns `StationError::EmptyPayload` for an empty list and
    /// `StationError::ParseError` if the first list element is not an object.
    pub fn into_latest(self) -> Result<LatestRecord, StationError> {
        match self {
            Self::Record(fields) => Ok(LatestRecord(fields)),
            Self::Records(records) => match records.into_iter().next() {
                Some(Value::Object(fields)) => Ok(LatestRecord(fields)),
                Some(other) => Err(StationError::ParseError(format!(
                    "expected a record object, got {}",
                    json_type_name(&other)
                ))),
                None => Err(StationError::EmptyPayload),
            },
        }
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Most recent station record as a flat JSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LatestRecord(Map<String, Value>);

impl LatestRecord {
    /// Wrap an already-decoded object
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Raw value of one field
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the record has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unwrap into the underlying object
    #[must_use]
    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> StationPayload {
        serde_json::from_value(value).expect("payload should decode")
    }

    #[test]
    fn object_is_used_directly() {
        let latest = payload(json!({"airtemp_01mnavg": 20.5}))
            .into_latest()
            .unwrap();
        assert_eq!(latest.get("airtemp_01mnavg"), Some(&json!(20.5)));
        assert_eq!(latest.len(), 1);
    }

    #[test]
    fn list_uses_first_element() {
        let latest = payload(json!([
            {"id": 2, "airtemp_01mnavg": 21.0},
            {"id": 1, "airtemp_01mnavg": 19.0}
        ]))
        .into_latest()
        .unwrap();
        assert_eq!(latest.get("id"), Some(&json!(2)));
        assert_eq!(latest.get("airtemp_01mnavg"), Some(&json!(21.0)));
    }

    #[test]
    fn empty_list_is_error() {
        let result = payload(json!([])).into_latest();
        assert!(matches!(result, Err(StationError::EmptyPayload)));
    }

    #[test]
    fn list_of_scalars_is_error() {
        let result = payload(json!([1, 2, 3])).into_latest();
        match result {
            Err(StationError::ParseError(msg)) => assert!(msg.contains("number")),
            other => unreachable!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn scalar_body_does_not_decode() {
        assert!(serde_json::from_value::<StationPayload>(json!("hello")).is_err());
        assert!(serde_json::from_value::<StationPayload>(json!(42)).is_err());
    }

    #[test]
    fn empty_object_is_an_empty_record() {
        let latest = payload(json!({})).into_latest().unwrap();
        assert!(latest.is_empty());
        assert!(latest.into_fields().is_empty());
    }
}
