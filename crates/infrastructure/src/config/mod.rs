//! Application configuration
//!
//! Layered with the `config` crate, later sources overriding earlier ones:
//! built-in defaults, `config.toml`, `wswr-options.toml` (written by the
//! options flow) and `WSWR_*` environment variables such as
//! `WSWR_STATION__API_URL`.

mod station;

use std::path::{Path, PathBuf};

use application::{ApplicationError, ConfigEntry, ENTRY_TITLE};
use domain::StationSettings;
use integration_wswr::StationConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use station::{OptionsAppConfig, StationAppConfig};

use crate::telemetry::TelemetryConfig;

/// Base name of the main configuration file
pub const CONFIG_FILE: &str = "config";

/// Base name of the file the options flow writes
pub const OPTIONS_FILE: &str = "wswr-options";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "WSWR";

/// Errors writing the options file
#[derive(Debug, Error)]
pub enum ConfigWriteError {
    /// Options could not be encoded as TOML
    #[error("Failed to encode options: {0}")]
    Encode(#[from] toml::ser::Error),

    /// Options file could not be written
    #[error("Failed to write options file: {0}")]
    Io(#[from] std::io::Error),
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Station entry configuration
    #[serde(default)]
    pub station: StationAppConfig,

    /// Revised settings from the options flow
    #[serde(default)]
    pub options: OptionsAppConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// On-disk layout of the options file
#[derive(Debug, Serialize)]
struct OptionsFile<'a> {
    options: &'a OptionsAppConfig,
}

impl AppConfig {
    /// Load configuration from explicit file paths and the environment
    ///
    /// Missing files are skipped.
    pub fn load_from(
        config_path: &Path,
        options_path: &Path,
    ) -> Result<Self, config::ConfigError> {
        debug!(config = %config_path.display(), options = %options_path.display(), "Loading configuration");
        let builder = config::Config::builder()
            .add_source(config::File::from(config_path).required(false))
            .add_source(config::File::from(options_path).required(false));

        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, config::ConfigError> {
        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("station.excluded_keys")
                    .try_parsing(true),
            )
            .build()?;
        config.try_deserialize()
    }

    /// Default location of the main configuration file
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        PathBuf::from(format!("{CONFIG_FILE}.toml"))
    }

    /// Default location of the options file
    #[must_use]
    pub fn default_options_path() -> PathBuf {
        PathBuf::from(format!("{OPTIONS_FILE}.toml"))
    }

    /// Build the config entry, validating data and options
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` naming every invalid field.
    pub fn to_config_entry(&self) -> Result<ConfigEntry, ApplicationError> {
        let data = self.station.settings();
        data.ensure_valid()
            .map_err(|e| ApplicationError::Configuration(format!("[station] {e}")))?;
        if self.station.timeout_secs == 0 {
            return Err(ApplicationError::Configuration(
                "[station] timeout_secs must be at least 1".to_string(),
            ));
        }

        let options = self.options.overlay(&data);
        if let Some(options) = &options {
            options
                .ensure_valid()
                .map_err(|e| ApplicationError::Configuration(format!("[options] {e}")))?;
        }

        Ok(ConfigEntry {
            entry_id: self.station.entry_id.clone(),
            title: ENTRY_TITLE.to_string(),
            data,
            options,
        })
    }

    /// HTTP client configuration for the entry's effective settings
    #[must_use]
    pub fn station_client_config(&self, entry: &ConfigEntry) -> StationConfig {
        StationConfig {
            api_url: entry.effective_settings().api_url.clone(),
            timeout_secs: self.station.timeout_secs,
        }
    }
}

/// Persist revised settings as the `[options]` table of `path`
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn write_options(path: &Path, settings: &StationSettings) -> Result<(), ConfigWriteError> {
    let options = OptionsAppConfig::from(settings);
    let contents = toml::to_string_pretty(&OptionsFile { options: &options })?;
    std::fs::write(path, contents)?;
    info!(path = %path.display(), interval_minutes = settings.interval_minutes, "Options saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn default_paths_are_in_working_directory() {
        assert_eq!(AppConfig::default_config_path(), PathBuf::from("config.toml"));
        assert_eq!(
            AppConfig::default_options_path(),
            PathBuf::from("wswr-options.toml")
        );
    }

    #[test]
    fn default_config_builds_valid_entry() {
        let config = AppConfig::default();
        let entry = config.to_config_entry().unwrap();
        assert_eq!(entry.entry_id, "wswr");
        assert_eq!(entry.title, "WSWR Weather Station API");
        assert!(entry.options.is_none());
        assert_eq!(entry.effective_settings(), &StationSettings::default());
    }

    #[test]
    fn load_from_missing_files_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(
            &dir.path().join("config.toml"),
            &dir.path().join("wswr-options.toml"),
        )
        .unwrap();
        assert_eq!(config.station, StationAppConfig::default());
        assert!(config.options.is_empty());
    }

    #[test]
    fn options_file_overrides_station_settings() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = write_file(
            &dir,
            "config.toml",
            "[station]\napi_url = \"http://test.url\"\ninterval_minutes = 5\nentry_id = \"e1\"\n",
        );
        let options_path = dir.path().join("wswr-options.toml");
        write_options(
            &options_path,
            &StationSettings::new("http://new.url", 10).unwrap(),
        )
        .unwrap();

        let config = AppConfig::load_from(&config_path, &options_path).unwrap();
        let entry = config.to_config_entry().unwrap();

        assert_eq!(entry.entry_id, "e1");
        assert_eq!(entry.data.api_url, "http://test.url");
        assert_eq!(entry.effective_settings().api_url, "http://new.url");
        assert_eq!(entry.effective_settings().interval_minutes, 10);
    }

    #[test]
    fn invalid_station_settings_rejected() {
        let mut config = AppConfig::default();
        config.station.interval_minutes = 0;
        let err = config.to_config_entry().unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
        assert!(err.to_string().contains("[station]"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut config = AppConfig::default();
        config.station.timeout_secs = 0;
        let err = config.to_config_entry().unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn invalid_options_rejected() {
        let mut config = AppConfig::default();
        config.options.api_url = Some("not a url".to_string());
        let err = config.to_config_entry().unwrap_err();
        assert!(err.to_string().contains("[options]"));
    }

    #[test]
    fn client_config_follows_effective_settings() {
        let mut config = AppConfig::default();
        config.station.timeout_secs = 3;
        config.options.api_url = Some("http://opt.url".to_string());

        let entry = config.to_config_entry().unwrap();
        let client = config.station_client_config(&entry);
        assert_eq!(client.api_url, "http://opt.url");
        assert_eq!(client.timeout_secs, 3);
    }

    #[test]
    fn written_options_are_plain_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wswr-options.toml");
        write_options(&path, &StationSettings::new("http://new.url", 10).unwrap()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[options]"));
        assert!(contents.contains("api_url = \"http://new.url\""));
        assert!(contents.contains("interval_minutes = 10"));
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let config = AppConfig::default();
        let encoded = toml::to_string(&config).unwrap();
        let decoded: AppConfig = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded, config);
    }
}
