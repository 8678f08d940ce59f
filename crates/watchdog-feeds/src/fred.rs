//! FRED Series Source
//!
//! Implementation of `MacroSeriesSource` against the FRED observations API.

use async_trait::async_trait;
use serde::Deserialize;

use macro_watchdog::catalog;
use macro_watchdog::error::{Result, WatchdogError};
use macro_watchdog::feeds::{HistoryPoint, MacroSeriesSource};
use macro_watchdog::observation::ScalarObservation;

const BASE_URL: &str = "https://api.stlouisfed.org/fred";

/// FRED client configuration
#[derive(Clone, Debug)]
pub struct FredConfig {
    /// API key; without one every fetch fails with a configuration error
    pub api_key: Option<String>,

    /// API base URL (overridable for tests)
    pub base_url: String,
}

impl Default for FredConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: BASE_URL.into(),
        }
    }
}

impl FredConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("FRED_API_KEY").ok(),
            ..Default::default()
        }
    }
}

/// FRED observations client
pub struct FredClient {
    client: reqwest::Client,
    config: FredConfig,
}

impl FredClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(FredConfig {
            api_key: Some(api_key.into()),
            ..Default::default()
        })
    }

    pub fn from_config(config: FredConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client, config }
    }

    /// Create from the `FRED_API_KEY` environment variable
    pub fn from_env() -> Self {
        Self::from_config(FredConfig::from_env())
    }

    async fn observations(&self, series_id: &str, limit: usize) -> Result<Vec<FredObservation>> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            WatchdogError::Config("FRED_API_KEY not found. Please set environment variable.".into())
        })?;

        let url = format!("{}/series/observations", self.config.base_url);
        let limit = limit.to_string();
        let response: ObservationsResponse = self
            .client
            .get(&url)
            .query(&[
                ("series_id", series_id),
                ("api_key", api_key),
                ("file_type", "json"),
                ("sort_order", "desc"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.observations)
    }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    #[serde(default)]
    observations: Vec<FredObservation>,
}

#[derive(Clone, Debug, Deserialize)]
struct FredObservation {
    date: String,
    value: String,
}

/// Newest-first API observations to an oldest-first chart series.
///
/// FRED marks missing data points with a `"."` value; those are skipped.
fn history_points(observations: Vec<FredObservation>) -> Vec<HistoryPoint> {
    let mut points: Vec<HistoryPoint> = observations
        .into_iter()
        .filter_map(|obs| {
            obs.value
                .trim()
                .parse::<f64>()
                .ok()
                .map(|value| HistoryPoint::new(obs.date, value))
        })
        .collect();

    points.sort_by(|a, b| a.date.cmp(&b.date));
    points
}

#[async_trait]
impl MacroSeriesSource for FredClient {
    async fn latest(&self, series_id: &str) -> Result<ScalarObservation> {
        let observations = self.observations(series_id, 1).await?;

        observations.into_iter().next().map_or_else(
            || Err(WatchdogError::NoData(series_id.to_string())),
            |obs| {
                Ok(ScalarObservation {
                    indicator: catalog::series_name(series_id).to_string(),
                    value: obs.value.into(),
                    date: obs.date,
                })
            },
        )
    }

    async fn history(&self, series_id: &str, limit: usize) -> Result<Vec<HistoryPoint>> {
        let observations = self.observations(series_id, limit).await?;
        Ok(history_points(observations))
    }

    fn name(&self) -> &str {
        "FRED"
    }
}
