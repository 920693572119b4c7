//! Station and options configuration.

use application::DEFAULT_EXCLUDED_KEYS;
use domain::{DEFAULT_API_URL, DEFAULT_INTERVAL_MINUTES, StationSettings};
use serde::{Deserialize, Serialize};

/// Station entry configuration (`[station]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationAppConfig {
    /// Most-recent-reading endpoint URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Polling interval in minutes (default: 1)
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u32,

    /// HTTP request timeout in seconds (default: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Entry id, prefix of every sensor's unique id
    #[serde(default = "default_entry_id")]
    pub entry_id: String,

    /// Record keys that never become sensors
    #[serde(default = "default_excluded_keys")]
    pub excluded_keys: Vec<String>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

const fn default_interval_minutes() -> u32 {
    DEFAULT_INTERVAL_MINUTES
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_entry_id() -> String {
    "wswr".to_string()
}

fn default_excluded_keys() -> Vec<String> {
    DEFAULT_EXCLUDED_KEYS
        .iter()
        .map(ToString::to_string)
        .collect()
}

impl Default for StationAppConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            interval_minutes: default_interval_minutes(),
            timeout_secs: default_timeout_secs(),
            entry_id: default_entry_id(),
            excluded_keys: default_excluded_keys(),
        }
    }
}

impl StationAppConfig {
    /// Settings as collected by the config flow
    #[must_use]
    pub fn settings(&self) -> StationSettings {
        StationSettings {
            api_url: self.api_url.clone(),
            interval_minutes: self.interval_minutes,
        }
    }
}

/// Revised settings written by the options flow (`[options]`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsAppConfig {
    /// Revised endpoint URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Revised polling interval in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_minutes: Option<u32>,
}

impl OptionsAppConfig {
    /// Check whether no option is set
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.api_url.is_none() && self.interval_minutes.is_none()
    }

    /// Options merged over `base`, or `None` when no option is set
    #[must_use]
    pub fn overlay(&self, base: &StationSettings) -> Option<StationSettings> {
        if self.is_empty() {
            return None;
        }
        Some(StationSettings {
            api_url: self.api_url.clone().unwrap_or_else(|| base.api_url.clone()),
            interval_minutes: self.interval_minutes.unwrap_or(base.interval_minutes),
        })
    }
}

impl From<&StationSettings> for OptionsAppConfig {
    fn from(settings: &StationSettings) -> Self {
        Self {
            api_url: Some(settings.api_url.clone()),
            interval_minutes: Some(settings.interval_minutes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_defaults() {
        let config = StationAppConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.interval_minutes, 1);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.entry_id, "wswr");
        assert_eq!(config.excluded_keys, vec!["id", "record_time"]);
    }

    #[test]
    fn station_deserialize_partial() {
        let config: StationAppConfig =
            toml::from_str("interval_minutes = 5\nexcluded_keys = []").unwrap();
        assert_eq!(config.interval_minutes, 5);
        assert!(config.excluded_keys.is_empty());
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn empty_options_do_not_overlay() {
        let options = OptionsAppConfig::default();
        assert!(options.is_empty());
        assert!(options.overlay(&StationSettings::default()).is_none());
    }

    #[test]
    fn partial_options_overlay_base() {
        let options = OptionsAppConfig {
            api_url: None,
            interval_minutes: Some(10),
        };
        let merged = options.overlay(&StationSettings::default()).unwrap();
        assert_eq!(merged.api_url, DEFAULT_API_URL);
        assert_eq!(merged.interval_minutes, 10);
    }

    #[test]
    fn options_skip_unset_fields() {
        let options = OptionsAppConfig {
            api_url: None,
            interval_minutes: Some(3),
        };
        let toml = toml::to_string(&options).unwrap();
        assert_eq!(toml.trim(), "interval_minutes = 3");
    }
}
