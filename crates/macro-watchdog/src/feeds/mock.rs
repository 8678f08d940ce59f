//! Mock Feed
//!
//! For testing and offline runs. Returns a fixed, deterministic snapshot of
//! every series and symbol in the catalog; two identical audits against the
//! mock produce byte-identical reports.

use std::collections::HashMap;

use async_trait::async_trait;

use super::{HistoryPoint, HistoryRange, MacroSeriesSource, MarginDebtSource, MarketDataSource};
use crate::error::{Result, WatchdogError};
use crate::observation::{InstrumentQuote, MarginDebtObservation, ScalarObservation};

const MOCK_DATE: &str = "2025-06-30";

/// Deterministic in-memory feed
pub struct MockFeed {
    series: HashMap<String, String>,
    quotes: HashMap<String, InstrumentQuote>,
    monthly_returns: HashMap<String, f64>,
    volumes: HashMap<String, u64>,
    margin_debt: Option<i64>,
}

impl Default for MockFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFeed {
    pub fn new() -> Self {
        let series = [
            ("GFDEGDQ188S", "120.77"),
            ("FEDFUNDS", "4.33"),
            ("INDPRO", "103.21"),
            ("M2SL", "21533.8"),
            ("RRPONTSYD", "98.0"),
            ("HOUST", "1499.0"),
            ("MORTGAGE30US", "6.85"),
            ("T10Y2Y", "0.32"),
            ("UMCSENT", "71.1"),
            ("UNRATE", "4.1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let quotes = [
            ("^VIX", (17.4, -2.1)),
            ("^GSPC", (5980.9, 1.1)),
            ("HYG", (79.5, 0.2)),
            ("TLT", (87.2, -0.4)),
            ("GC=F", (2650.4, 1.2)),
            ("SI=F", (30.1, -0.6)),
            ("HG=F", (4.18, 0.9)),
            ("PL=F", (942.0, 0.4)),
            ("BTC-USD", (97500.0, 4.2)),
            ("ETH-USD", (3450.0, 1.8)),
            ("EZU", (52.1, 0.6)),
            ("EWJ", (68.9, 0.3)),
            ("EEM", (42.8, -0.2)),
            ("SPY", (598.4, 1.1)),
        ]
        .into_iter()
        .map(|(sym, (price, change))| {
            (
                sym.to_string(),
                InstrumentQuote {
                    price,
                    change_5d_pct: change,
                },
            )
        })
        .collect();

        let monthly_returns = [
            ("XLK", 2.4),
            ("XLE", 1.2),
            ("XLP", -0.8),
            ("XLU", -1.5),
            ("XLV", 0.5),
            ("XLY", 3.1),
            ("XLI", 1.9),
            ("SPY", 2.1),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let volumes = [("^GSPC", 3_910_000_000_u64)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();

        Self {
            series,
            quotes,
            monthly_returns,
            volumes,
            margin_debt: Some(935_000),
        }
    }

    /// Override a scalar series value
    pub fn with_series(mut self, series_id: &str, value: &str) -> Self {
        self.series.insert(series_id.into(), value.into());
        self
    }

    /// Remove a scalar series so its fetch fails
    pub fn without_series(mut self, series_id: &str) -> Self {
        self.series.remove(series_id);
        self
    }

    /// Override a quote's price and five-day change
    pub fn with_quote(mut self, symbol: &str, price: f64, change_5d_pct: f64) -> Self {
        self.quotes.insert(
            symbol.into(),
            InstrumentQuote {
                price,
                change_5d_pct,
            },
        );
        self
    }

    /// Override a sector's one-month return
    pub fn with_monthly_return(mut self, symbol: &str, pct: f64) -> Self {
        self.monthly_returns.insert(symbol.into(), pct);
        self
    }

    /// Override the margin-debt reading
    pub fn with_margin_debt(mut self, value: i64) -> Self {
        self.margin_debt = Some(value);
        self
    }

    /// Make the margin-debt fetch fail
    pub fn without_margin_debt(mut self) -> Self {
        self.margin_debt = None;
        self
    }

    fn synthetic_history(base: f64, points: usize) -> Vec<HistoryPoint> {
        (0..points)
            .map(|i| {
                let month = (i % 12) + 1;
                let year = 2023 + i / 12;
                let wobble = 1.0 + 0.01 * ((i % 7) as f64 - 3.0);
                HistoryPoint::new(format!("{year:04}-{month:02}-01"), base * wobble)
            })
            .collect()
    }
}

#[async_trait]
impl MacroSeriesSource for MockFeed {
    async fn latest(&self, series_id: &str) -> Result<ScalarObservation> {
        let value = self
            .series
            .get(series_id)
            .ok_or_else(|| WatchdogError::NoData(series_id.to_string()))?;

        Ok(ScalarObservation {
            indicator: crate::catalog::series_name(series_id).to_string(),
            value: value.as_str().into(),
            date: MOCK_DATE.to_string(),
        })
    }

    async fn history(&self, series_id: &str, limit: usize) -> Result<Vec<HistoryPoint>> {
        let value = self
            .series
            .get(series_id)
            .ok_or_else(|| WatchdogError::NoData(series_id.to_string()))?;
        let base: f64 = value.parse().unwrap_or(100.0);

        Ok(Self::synthetic_history(base, limit.min(24)))
    }

    fn name(&self) -> &str {
        "MockFeed"
    }
}

#[async_trait]
impl MarketDataSource for MockFeed {
    async fn latest_close(&self, symbol: &str) -> Result<f64> {
        self.quotes
            .get(symbol)
            .map(|q| q.price)
            .ok_or_else(|| WatchdogError::UnsupportedSymbol(symbol.to_string()))
    }

    async fn latest_volume(&self, symbol: &str) -> Result<u64> {
        self.volumes
            .get(symbol)
            .copied()
            .ok_or_else(|| WatchdogError::UnsupportedSymbol(symbol.to_string()))
    }

    async fn five_day_change(&self, symbol: &str) -> Result<InstrumentQuote> {
        self.quotes
            .get(symbol)
            .copied()
            .ok_or_else(|| WatchdogError::UnsupportedSymbol(symbol.to_string()))
    }

    async fn monthly_return(&self, symbol: &str) -> Result<f64> {
        self.monthly_returns
            .get(symbol)
            .copied()
            .ok_or_else(|| WatchdogError::UnsupportedSymbol(symbol.to_string()))
    }

    async fn close_history(&self, symbol: &str, range: HistoryRange) -> Result<Vec<HistoryPoint>> {
        let quote = self
            .quotes
            .get(symbol)
            .ok_or_else(|| WatchdogError::UnsupportedSymbol(symbol.to_string()))?;

        let points = match range {
            HistoryRange::ThreeMonths => 3,
            HistoryRange::TwoYears => 24,
            HistoryRange::FiveYears => 60,
        };

        Ok(Self::synthetic_history(quote.price, points))
    }

    fn name(&self) -> &str {
        "MockFeed"
    }
}

#[async_trait]
impl MarginDebtSource for MockFeed {
    async fn latest(&self) -> Result<MarginDebtObservation> {
        let value = self
            .margin_debt
            .ok_or_else(|| WatchdogError::Feed("margin statistics unavailable".into()))?;

        Ok(MarginDebtObservation {
            indicator: "FINRA Margin Debt".into(),
            value,
            date: MOCK_DATE.to_string(),
            note: "Value in Millions".into(),
        })
    }

    async fn history(&self, limit: usize) -> Result<Vec<HistoryPoint>> {
        let value = self
            .margin_debt
            .ok_or_else(|| WatchdogError::Feed("margin statistics unavailable".into()))?;

        Ok(Self::synthetic_history(value as f64, limit.min(60)))
    }

    fn name(&self) -> &str {
        "MockFeed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_serves_catalog_series() {
        let feed = MockFeed::new();

        let obs = MacroSeriesSource::latest(&feed, "INDPRO").await.unwrap();
        assert_eq!(obs.indicator, "Industrial Production Index");
        assert_eq!(obs.value.as_f64(), Some(103.21));
    }

    #[tokio::test]
    async fn overrides_apply() {
        let feed = MockFeed::new()
            .with_series("GFDEGDQ188S", "125")
            .with_quote("^VIX", 34.0, 8.0)
            .without_margin_debt();

        let debt = MacroSeriesSource::latest(&feed, "GFDEGDQ188S").await.unwrap();
        assert_eq!(debt.value.as_f64(), Some(125.0));

        let vix = feed.latest_close("^VIX").await.unwrap();
        assert!((vix - 34.0).abs() < f64::EPSILON);

        assert!(MarginDebtSource::latest(&feed).await.is_err());
    }

    #[tokio::test]
    async fn unknown_symbol_is_rejected() {
        let feed = MockFeed::new();
        let result = feed.five_day_change("NOTREAL").await;
        assert!(matches!(result, Err(WatchdogError::UnsupportedSymbol(_))));
    }
}
