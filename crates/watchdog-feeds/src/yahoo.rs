//! Yahoo Finance Market Data Source
//!
//! Implementation of `MarketDataSource` against the Yahoo Finance v8 chart
//! API. Covers equities, ETFs, futures (GC=F style symbols), index tickers
//! (^VIX, ^GSPC) and crypto pairs (BTC-USD).

use async_trait::async_trait;
use serde::Deserialize;

use macro_watchdog::error::{Result, WatchdogError};
use macro_watchdog::feeds::{HistoryPoint, HistoryRange, MarketDataSource};
use macro_watchdog::observation::InstrumentQuote;

const BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Yahoo Finance chart client
pub struct YahooClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for YahooClient {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooClient {
    pub fn new() -> Self {
        // Yahoo rejects requests without a browser-looking user agent.
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; macro-watchdog/0.1)")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: BASE_URL.into(),
        }
    }

    /// Override the API base URL (for tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn chart(&self, symbol: &str, range: &str) -> Result<ChartSeries> {
        let url = format!("{}/v8/finance/chart/{symbol}", self.base_url);
        let response: ChartResponse = self
            .client
            .get(&url)
            .query(&[("range", range), ("interval", "1d")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        chart_series(response, symbol)
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,

    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Option<Vec<i64>>,

    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteBlock {
    #[serde(default)]
    close: Option<Vec<Option<f64>>>,

    #[serde(default)]
    volume: Option<Vec<Option<u64>>>,
}

/// Daily bars for one symbol, nulls preserved
#[derive(Debug)]
struct ChartSeries {
    timestamps: Vec<i64>,
    closes: Vec<Option<f64>>,
    volumes: Vec<Option<u64>>,
}

impl ChartSeries {
    /// Non-null closes, oldest first
    fn closes(&self) -> Vec<f64> {
        self.closes.iter().copied().flatten().collect()
    }
}

fn chart_series(response: ChartResponse, symbol: &str) -> Result<ChartSeries> {
    if let Some(error) = response.chart.error {
        return Err(WatchdogError::Feed(
            error
                .description
                .unwrap_or_else(|| format!("chart error for {symbol}")),
        ));
    }

    let result = response
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
        .ok_or_else(|| WatchdogError::UnsupportedSymbol(symbol.to_string()))?;

    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    Ok(ChartSeries {
        timestamps: result.timestamp.unwrap_or_default(),
        closes: quote.close.unwrap_or_default(),
        volumes: quote.volume.unwrap_or_default(),
    })
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn percent_change(start: f64, end: f64) -> Option<f64> {
    if start == 0.0 {
        return None;
    }
    Some(round2((end - start) / start * 100.0))
}

fn format_date(timestamp: i64) -> Option<String> {
    chrono::DateTime::from_timestamp(timestamp, 0).map(|dt| dt.format("%Y-%m-%d").to_string())
}

#[async_trait]
impl MarketDataSource for YahooClient {
    async fn latest_close(&self, symbol: &str) -> Result<f64> {
        let series = self.chart(symbol, "5d").await?;
        series
            .closes()
            .last()
            .copied()
            .ok_or_else(|| WatchdogError::NoData(symbol.to_string()))
    }

    async fn latest_volume(&self, symbol: &str) -> Result<u64> {
        let series = self.chart(symbol, "5d").await?;
        series
            .volumes
            .iter()
            .copied()
            .flatten()
            .last()
            .ok_or_else(|| WatchdogError::NoData(symbol.to_string()))
    }

    async fn five_day_change(&self, symbol: &str) -> Result<InstrumentQuote> {
        let series = self.chart(symbol, "5d").await?;
        let closes = series.closes();

        let (first, last) = match (closes.first(), closes.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return Err(WatchdogError::NoData(symbol.to_string())),
        };

        let change_5d_pct = percent_change(first, last)
            .ok_or_else(|| WatchdogError::Feed(format!("zero base price for {symbol}")))?;

        Ok(InstrumentQuote {
            price: round2(last),
            change_5d_pct,
        })
    }

    async fn monthly_return(&self, symbol: &str) -> Result<f64> {
        let series = self.chart(symbol, "3mo").await?;
        let closes = series.closes();

        // ~22 trading days back approximates one calendar month.
        if closes.len() <= 20 {
            return Err(WatchdogError::NoData(symbol.to_string()));
        }

        let latest = closes[closes.len() - 1];
        let lookback = closes.len().saturating_sub(22);
        let previous = closes[lookback];

        percent_change(previous, latest)
            .ok_or_else(|| WatchdogError::Feed(format!("zero base price for {symbol}")))
    }

    async fn close_history(&self, symbol: &str, range: HistoryRange) -> Result<Vec<HistoryPoint>> {
        let series = self.chart(symbol, range.as_str()).await?;

        let points = series
            .timestamps
            .iter()
            .zip(series.closes.iter())
            .filter_map(|(&ts, close)| {
                let close = (*close)?;
                let date = format_date(ts)?;
                Some(HistoryPoint::new(date, close))
            })
            .collect();

        Ok(points)
    }

    fn name(&self) -> &str {
        "YahooFinance"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_change_rounds_to_two_decimals() {
        assert_eq!(percent_change(100.0, 104.237), Some(4.24));
        assert_eq!(percent_change(200.0, 190.0), Some(-5.0));
        assert_eq!(percent_change(0.0, 10.0), None);
    }

    #[test]
    fn chart_response_deserializes_and_flattens() {
        let json = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1735689600, 1735776000],
                    "indicators": {
                        "quote": [{
                            "close": [100.0, null],
                            "volume": [1000, 2000]
                        }]
                    }
                }],
                "error": null
            }
        }"#;

        let response: ChartResponse = serde_json::from_str(json).unwrap();
        let series = chart_series(response, "SPY").unwrap();
        assert_eq!(series.closes(), vec![100.0]);
        assert_eq!(series.timestamps.len(), 2);
    }

    #[test]
    fn chart_error_surfaces_as_feed_error() {
        let json = r#"{
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found"}
            }
        }"#;

        let response: ChartResponse = serde_json::from_str(json).unwrap();
        let err = chart_series(response, "NOPE").unwrap_err();
        assert!(matches!(err, WatchdogError::Feed(_)));
    }

    #[test]
    fn timestamps_format_as_dates() {
        assert_eq!(format_date(1735689600).as_deref(), Some("2025-01-01"));
    }
}
