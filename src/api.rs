//! Telemetry API client.
//!
//! This module defines the wire types returned by the history endpoint,
//! the HistoryProvider trait and the concrete HTTP implementation used
//! to fetch raw series and event lists for one time window.

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

/// One watering occurrence, as reported by the server.
///
/// The payload carries more detail (amount, outcome) than the dashboard
/// shows; only the timestamp and pot id are kept.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct WateringEvent {
    #[serde(default)]
    pub ts: i64,
    #[serde(default)]
    pub pot: Option<u8>,
}

/// A manually triggered watering, no payload beyond the timestamp
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ManualEvent {
    #[serde(default)]
    pub ts: i64,
}

/// Raw history payload for one window.
///
/// All series are index-aligned with `timestamps`. Every field defaults to
/// empty so a partial payload degrades to empty series instead of a decode
/// error; per-sample gaps arrive as JSON null and stay `None`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct HistoryResponse {
    #[serde(default)]
    pub timestamps: Vec<i64>,
    #[serde(default)]
    pub soil1: Vec<Option<f64>>,
    #[serde(default)]
    pub soil2: Vec<Option<f64>>,
    #[serde(default)]
    pub soil3: Vec<Option<f64>>,
    #[serde(default)]
    pub temp: Vec<Option<f64>>,
    #[serde(default)]
    pub hum: Vec<Option<f64>>,
    #[serde(default)]
    pub watering: Vec<WateringEvent>,
    #[serde(default)]
    pub manual: Vec<ManualEvent>,
}

/// Source of history data for the dashboard
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Fetch raw series and events covering the last `hours` hours
    async fn fetch_history(&self, hours: u32) -> Result<HistoryResponse>;
}

/// HTTP client for the telemetry server
pub struct HistoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl HistoryClient {
    /// Create a new client from API configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build the history endpoint URL for one window
    fn history_url(&self, hours: u32) -> String {
        format!("{}/api/history?hours={}", self.base_url, hours)
    }
}

#[async_trait]
impl HistoryProvider for HistoryClient {
    async fn fetch_history(&self, hours: u32) -> Result<HistoryResponse> {
        let url = self.history_url(hours);
        tracing::debug!(url = %url, "fetching history");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::StatusError {
                status: status.as_u16(),
                url,
            }
            .into());
        }

        let history = response
            .json::<HistoryResponse>()
            .await
            .map_err(|e| ApiError::DecodeError(e.to_string()))?;

        tracing::debug!(
            samples = history.timestamps.len(),
            watering = history.watering.len(),
            manual = history.manual.len(),
            "history fetched"
        );
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    #[test]
    fn test_decode_full_payload() {
        let json = r#"{
            "timestamps": [1000, 1060, 1120],
            "soil1": [41.5, null, 43.0],
            "soil2": [50.0, 50.5, 51.0],
            "soil3": [null, null, null],
            "temp": [21.0, 21.5, 22.0],
            "hum": [55.0, 56.0, 57.0],
            "watering": [{"ts": 1050, "pot": 2, "ml": 120.0, "result": "ok"}],
            "manual": [{"ts": 1100, "code": "manual_water_start"}]
        }"#;

        let history: HistoryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(history.timestamps, vec![1000, 1060, 1120]);
        assert_eq!(history.soil1, vec![Some(41.5), None, Some(43.0)]);
        assert_eq!(history.soil3, vec![None, None, None]);
        assert_eq!(history.watering.len(), 1);
        assert_eq!(history.watering[0].pot, Some(2));
        assert_eq!(history.manual[0].ts, 1100);
    }

    #[test]
    fn test_decode_missing_fields_default_to_empty() {
        let history: HistoryResponse = serde_json::from_str("{}").unwrap();
        assert!(history.timestamps.is_empty());
        assert!(history.soil1.is_empty());
        assert!(history.watering.is_empty());
        assert!(history.manual.is_empty());
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let json = r#"{
            "timestamps": [1000],
            "soil1": [40.0],
            "soil1_raw": [512],
            "extra": {"nested": true}
        }"#;

        let history: HistoryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(history.timestamps, vec![1000]);
        assert_eq!(history.soil1, vec![Some(40.0)]);
    }

    #[test]
    fn test_decode_event_with_extra_details() {
        // pot may be null; amount and outcome are present on the wire but unused
        let json = r#"{"watering": [{"ts": 1050, "pot": null, "ml": 120.0, "result": "ok"}]}"#;
        let history: HistoryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(history.watering[0].ts, 1050);
        assert_eq!(history.watering[0].pot, None);
    }

    #[test]
    fn test_history_url_includes_window() {
        let config = ApiConfig {
            base_url: "http://plants.local:8080".to_string(),
            ..ApiConfig::default()
        };
        let client = HistoryClient::new(&config).unwrap();
        assert_eq!(
            client.history_url(24),
            "http://plants.local:8080/api/history?hours=24"
        );
    }

    #[test]
    fn test_history_url_keeps_https_scheme() {
        let config = ApiConfig {
            base_url: "https://plants.example:8443".to_string(),
            ..ApiConfig::default()
        };
        let client = HistoryClient::new(&config).unwrap();
        assert_eq!(
            client.history_url(72),
            "https://plants.example:8443/api/history?hours=72"
        );
    }

    #[test]
    fn test_history_url_trims_trailing_slash() {
        let config = ApiConfig {
            base_url: "http://plants.local:8080/".to_string(),
            ..ApiConfig::default()
        };
        let client = HistoryClient::new(&config).unwrap();
        assert_eq!(
            client.history_url(6),
            "http://plants.local:8080/api/history?hours=6"
        );
    }
}
