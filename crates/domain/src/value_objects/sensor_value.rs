//! Sensor value object
//!
//! A single scalar reading as delivered by the station API. Numbers keep
//! their JSON representation so integer ids and decimal readings round-trip
//! exactly.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

use crate::errors::DomainError;

/// Scalar value of one measurement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensorValue {
    /// Explicit `null` from the station
    Null,
    /// Boolean flag
    Bool(bool),
    /// Numeric reading
    Number(Number),
    /// Text such as timestamps (`record_time`, gust times)
    Text(String),
}

impl SensorValue {
    /// Convert a JSON value into a scalar reading
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidReading` for arrays and objects.
    pub fn from_json(key: &str, value: Value) -> Result<Self, DomainError> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::Bool(b) => Ok(Self::Bool(b)),
            Value::Number(n) => Ok(Self::Number(n)),
            Value::String(s) => Ok(Self::Text(s)),
            Value::Array(_) => Err(DomainError::invalid_reading(key, "array is not a scalar")),
            Value::Object(_) => Err(DomainError::invalid_reading(key, "object is not a scalar")),
        }
    }

    /// Numeric view of the value, if it is a number
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Text view of the value, if it is a string
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Check for an explicit `null`
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for SensorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("unknown"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for SensorValue {
    /// Non-finite values have no JSON representation and become `Null`
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl From<i64> for SensorValue {
    fn from(value: i64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<&str> for SensorValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SensorValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_convert() {
        assert_eq!(
            SensorValue::from_json("k", Value::Null).unwrap(),
            SensorValue::Null
        );
        assert_eq!(
            SensorValue::from_json("k", json!(true)).unwrap(),
            SensorValue::Bool(true)
        );
        assert_eq!(
            SensorValue::from_json("k", json!(20.5)).unwrap(),
            SensorValue::from(20.5)
        );
        assert_eq!(
            SensorValue::from_json("k", json!("2025-01-31 10:01:00")).unwrap(),
            SensorValue::from("2025-01-31 10:01:00")
        );
    }

    #[test]
    fn nested_values_are_rejected() {
        let err = SensorValue::from_json("airtemp_01mnavg", json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("airtemp_01mnavg"));
        assert!(err.to_string().contains("array"));

        let err = SensorValue::from_json("airtemp_01mnavg", json!({"a": 1})).unwrap_err();
        assert!(err.to_string().contains("object"));
    }

    #[test]
    fn integers_keep_exact_representation() {
        let value = SensorValue::from_json("id", json!(123_456_789)).unwrap();
        assert_eq!(value.to_string(), "123456789");
        assert_eq!(value, SensorValue::from(123_456_789_i64));
    }

    #[test]
    fn numeric_and_text_views() {
        assert_eq!(SensorValue::from(1013.2).as_f64(), Some(1013.2));
        assert_eq!(SensorValue::from("10:15").as_f64(), None);
        assert_eq!(SensorValue::from("10:15").as_str(), Some("10:15"));
        assert!(SensorValue::Null.is_null());
    }

    #[test]
    fn non_finite_float_becomes_null() {
        assert_eq!(SensorValue::from(f64::NAN), SensorValue::Null);
        assert_eq!(SensorValue::from(f64::INFINITY), SensorValue::Null);
    }

    #[test]
    fn display() {
        assert_eq!(SensorValue::Null.to_string(), "unknown");
        assert_eq!(SensorValue::from(20.5).to_string(), "20.5");
        assert_eq!(SensorValue::Bool(false).to_string(), "false");
    }

    #[test]
    fn serializes_as_plain_json() {
        let json = serde_json::to_value(SensorValue::from(4.2)).expect("serialize");
        assert_eq!(json, json!(4.2));
        let json = serde_json::to_value(SensorValue::Null).expect("serialize");
        assert_eq!(json, Value::Null);
    }
}
