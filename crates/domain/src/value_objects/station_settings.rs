//! Station connection settings
//!
//! The two user-facing settings of a station entry: where to fetch the latest
//! reading from and how often.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::StationSettings;
//!
//! let settings = StationSettings::new("http://station.local/latest", 5).expect("valid");
//! assert_eq!(settings.interval().as_secs(), 300);
//!
//! assert!(StationSettings::new("not a url", 5).is_err());
//! assert!(StationSettings::new("http://station.local/latest", 0).is_err());
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::DomainError;

/// Default endpoint returning the most recent station record
pub const DEFAULT_API_URL: &str = "https://api.wswr.jkent.tech/weatherdata/mostrecent/60";

/// Default polling interval in minutes
pub const DEFAULT_INTERVAL_MINUTES: u32 = 1;

/// Upper bound for the polling interval (one day)
pub const MAX_INTERVAL_MINUTES: u32 = 1440;

/// Endpoint URL and polling interval of one station entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct StationSettings {
    /// URL of the most-recent-reading endpoint
    #[validate(url(code = "invalid_url"))]
    pub api_url: String,

    /// Polling interval in minutes
    #[validate(range(min = 1, max = MAX_INTERVAL_MINUTES, code = "invalid_interval"))]
    pub interval_minutes: u32,
}

impl StationSettings {
    /// Create validated settings
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` listing every invalid field.
    pub fn new(api_url: impl Into<String>, interval_minutes: u32) -> Result<Self, DomainError> {
        let settings = Self {
            api_url: api_url.into(),
            interval_minutes,
        };
        settings.ensure_valid()?;
        Ok(settings)
    }

    /// Validate already-constructed settings (e.g. deserialized from a file)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` listing every invalid field.
    pub fn ensure_valid(&self) -> Result<(), DomainError> {
        let errors = self.field_errors();
        if errors.is_empty() {
            return Ok(());
        }
        let joined = errors
            .iter()
            .map(|(field, code)| format!("{field}: {code}"))
            .collect::<Vec<_>>()
            .join("; ");
        Err(DomainError::ValidationError(joined))
    }

    /// Per-field error codes, empty when the settings are valid
    #[must_use]
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        let Err(errors) = self.validate() else {
            return BTreeMap::new();
        };

        errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let code = errs
                    .first()
                    .map_or_else(|| "invalid".to_string(), |e| e.code.to_string());
                (field.to_string(), code)
            })
            .collect()
    }

    /// Polling interval as a duration
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.interval_minutes) * 60)
    }
}

impl Default for StationSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = StationSettings::default();
        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert_eq!(settings.interval_minutes, 1);
        assert!(settings.ensure_valid().is_ok());
        assert!(settings.field_errors().is_empty());
    }

    #[test]
    fn interval_in_minutes() {
        let settings = StationSettings::new("http://test.url", 10).unwrap();
        assert_eq!(settings.interval(), Duration::from_secs(600));
    }

    #[test]
    fn invalid_url_reported_per_field() {
        let settings = StationSettings {
            api_url: "no scheme here".to_string(),
            interval_minutes: 5,
        };
        let errors = settings.field_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("api_url").map(String::as_str), Some("invalid_url"));
    }

    #[test]
    fn zero_interval_rejected() {
        let settings = StationSettings {
            api_url: "http://test.url".to_string(),
            interval_minutes: 0,
        };
        assert_eq!(
            settings.field_errors().get("interval_minutes").map(String::as_str),
            Some("invalid_interval")
        );
    }

    #[test]
    fn interval_above_one_day_rejected() {
        assert!(StationSettings::new("http://test.url", MAX_INTERVAL_MINUTES).is_ok());
        assert!(StationSettings::new("http://test.url", MAX_INTERVAL_MINUTES + 1).is_err());
    }

    #[test]
    fn error_message_lists_all_fields() {
        let err = StationSettings::new("bad", 0).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("api_url: invalid_url"));
        assert!(message.contains("interval_minutes: invalid_interval"));
    }

    #[test]
    fn deserializes_from_json() {
        let settings: StationSettings =
            serde_json::from_str(r#"{"api_url": "http://new.url", "interval_minutes": 10}"#)
                .expect("deserialize");
        assert_eq!(settings.api_url, "http://new.url");
        assert_eq!(settings.interval_minutes, 10);
    }
}
