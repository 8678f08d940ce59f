//! Data Feeds
//!
//! Abstractions over the external data sources the watchdog audits. Real
//! integrations live in the `watchdog-feeds` crate; `MockFeed` serves tests
//! and offline runs.

mod mock;

pub use mock::MockFeed;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::observation::{InstrumentQuote, MarginDebtObservation, ScalarObservation};

/// One point of a charted series
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// Observation date (YYYY-MM-DD)
    pub date: String,

    pub value: f64,
}

impl HistoryPoint {
    pub fn new(date: impl Into<String>, value: f64) -> Self {
        Self {
            date: date.into(),
            value,
        }
    }
}

/// Chart lookback windows used by the dashboard
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryRange {
    ThreeMonths,
    TwoYears,
    FiveYears,
}

impl HistoryRange {
    /// Range token understood by the market-data provider
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ThreeMonths => "3mo",
            Self::TwoYears => "2y",
            Self::FiveYears => "5y",
        }
    }
}

/// Macro time-series source (FRED or equivalent)
#[async_trait]
pub trait MacroSeriesSource: Send + Sync {
    /// Latest observation for a series
    async fn latest(&self, series_id: &str) -> Result<ScalarObservation>;

    /// Historical observations, oldest first, unparseable points skipped
    async fn history(&self, series_id: &str, limit: usize) -> Result<Vec<HistoryPoint>>;

    /// Source name
    fn name(&self) -> &str;
}

/// Quote source for equities, ETFs, futures and crypto pairs
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Most recent close
    async fn latest_close(&self, symbol: &str) -> Result<f64>;

    /// Most recent daily volume
    async fn latest_volume(&self, symbol: &str) -> Result<u64>;

    /// Latest close plus percent change over the trailing five sessions
    async fn five_day_change(&self, symbol: &str) -> Result<InstrumentQuote>;

    /// Percent return over roughly one month (22 trading days)
    async fn monthly_return(&self, symbol: &str) -> Result<f64>;

    /// Daily close history for charting, oldest first
    async fn close_history(&self, symbol: &str, range: HistoryRange) -> Result<Vec<HistoryPoint>>;

    /// Source name
    fn name(&self) -> &str;
}

/// FINRA margin statistics source
#[async_trait]
pub trait MarginDebtSource: Send + Sync {
    /// Latest debit-balance reading
    async fn latest(&self) -> Result<MarginDebtObservation>;

    /// Monthly history, oldest first, at most `limit` points
    async fn history(&self, limit: usize) -> Result<Vec<HistoryPoint>>;

    /// Source name
    fn name(&self) -> &str;
}
