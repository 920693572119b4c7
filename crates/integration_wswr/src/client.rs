//! WSWR station client
//!
//! HTTP client for the station's most-recent-reading endpoint.

use std::time::Duration;

use async_trait::async_trait;
use domain::DEFAULT_API_URL;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{LatestRecord, StationPayload};

/// Station client errors
#[derive(Debug, Error)]
pub enum StationError {
    /// Connection to the station endpoint failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the station endpoint failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// The endpoint answered with a status other than 200
    #[error("Error fetching data: HTTP {0}")]
    HttpStatus(u16),

    /// Failed to parse the response body
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The endpoint returned an empty record list
    #[error("Empty payload: no records returned")]
    EmptyPayload,
}

impl StationError {
    /// Check whether a later attempt may succeed without configuration changes
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::ConnectionFailed(_) | Self::Timeout(_) | Self::EmptyPayload => true,
            Self::HttpStatus(code) => *code >= 500 || *code == 429,
            Self::RequestFailed(_) | Self::ParseError(_) => false,
        }
    }
}

/// Station client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationConfig {
    /// Most-recent-reading endpoint URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Station client trait for fetching the latest record
#[async_trait]
pub trait StationClient: Send + Sync {
    /// Fetch and normalize the most recent record
    async fn fetch_latest(&self) -> Result<LatestRecord, StationError>;

    /// Check if the station endpoint answers with a usable record
    async fn is_healthy(&self) -> bool {
        self.fetch_latest().await.is_ok()
    }
}

/// reqwest-backed station client
#[derive(Debug)]
pub struct HttpStationClient {
    client: Client,
    config: StationConfig,
}

impl HttpStationClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: StationConfig) -> Result<Self, StationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StationError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, StationError> {
        Self::new(StationConfig::default())
    }

    /// Endpoint this client polls
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.config.api_url
    }

    /// Map a reqwest error onto the station error kinds
    fn map_transport_error(&self, err: &reqwest::Error) -> StationError {
        if err.is_timeout() {
            StationError::Timeout(self.config.timeout_secs)
        } else if err.is_connect() {
            StationError::ConnectionFailed(err.to_string())
        } else {
            StationError::RequestFailed(err.to_string())
        }
    }
}

#[async_trait]
impl StationClient for HttpStationClient {
    #[instrument(skip(self), fields(url = %self.config.api_url))]
    async fn fetch_latest(&self) -> Result<LatestRecord, StationError> {
        let response = self
            .client
            .get(&self.config.api_url)
            .send()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(StationError::HttpStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        let payload: StationPayload =
            serde_json::from_slice(&body).map_err(|e| StationError::ParseError(e.to_string()))?;

        let latest = payload.into_latest()?;
        debug!(fields = latest.len(), "Fetched latest station record");

        Ok(latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = StationConfig::default();
        assert_eq!(
            config.api_url,
            "https://api.wswr.jkent.tech/weatherdata/mostrecent/60"
        );
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: StationConfig =
            serde_json::from_str(r#"{"api_url": "http://test.url"}"#).expect("should deserialize");
        assert_eq!(config.api_url, "http://test.url");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_client_creation() {
        let client = HttpStationClient::with_defaults();
        assert!(client.is_ok());
    }

    #[test]
    fn test_api_url_accessor() {
        let client = HttpStationClient::new(StationConfig {
            api_url: "http://station.local/latest".to_string(),
            timeout_secs: 3,
        })
        .expect("client creation should succeed");
        assert_eq!(client.api_url(), "http://station.local/latest");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            StationError::HttpStatus(503).to_string(),
            "Error fetching data: HTTP 503"
        );
        assert_eq!(
            StationError::Timeout(10).to_string(),
            "Request timed out after 10s"
        );
        assert!(StationError::EmptyPayload.to_string().contains("no records"));
    }

    #[test]
    fn test_transient_errors() {
        assert!(StationError::Timeout(10).is_transient());
        assert!(StationError::HttpStatus(502).is_transient());
        assert!(StationError::HttpStatus(429).is_transient());
        assert!(!StationError::HttpStatus(404).is_transient());
        assert!(!StationError::ParseError("x".into()).is_transient());
    }
}
