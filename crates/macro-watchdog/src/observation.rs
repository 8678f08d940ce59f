//! Observation Model
//!
//! Every fetched indicator lands in the result set as one `Observation`
//! variant. The variant set is closed: consumers pattern-match instead of
//! probing map keys, and an error-shaped result is indistinguishable from an
//! absent one for every downstream reader.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar that arrived either as a JSON number or as a string.
///
/// FRED delivers observation values as strings (including the `"."`
/// placeholder for missing data points), so the raw text is kept for report
/// interpolation and parsed lazily for comparisons.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Numeric view; `None` when the text does not parse.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// Latest value of a single time series
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScalarObservation {
    /// Friendly indicator name
    pub indicator: String,

    /// Latest observation value, as delivered upstream
    pub value: RawValue,

    /// Observation date (YYYY-MM-DD)
    pub date: String,
}

/// FINRA margin-debt reading
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarginDebtObservation {
    pub indicator: String,

    /// Debit balances in customers' securities margin accounts
    pub value: i64,

    pub date: String,

    /// Unit note ("Value in Millions")
    pub note: String,
}

/// Market risk sentiment bundle (VIX, participation, credit appetite)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SentimentObservation {
    pub indicator: String,

    pub vix: Option<f64>,

    pub sp500_volume: Option<u64>,

    /// HYG / TLT ratio
    pub risk_ratio: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hyg_price: Option<f64>,
}

/// Latest price plus trailing five-day move for one instrument
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct InstrumentQuote {
    pub price: f64,

    #[serde(rename = "5d_change_pct")]
    pub change_5d_pct: f64,
}

/// Direction of a crypto asset's recent move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Bullish,
    Bearish,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CryptoQuote {
    pub price: f64,

    #[serde(rename = "5d_change_pct")]
    pub change_5d_pct: f64,

    pub trend: Trend,
}

/// Metal futures bundle, keyed by metal name (Gold, Silver, ...)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MetalsObservation {
    pub indicator: String,
    pub metals: BTreeMap<String, InstrumentQuote>,
}

/// Crypto bundle, keyed by ticker (BTC-USD, ETH-USD)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CryptoObservation {
    pub crypto: BTreeMap<String, CryptoQuote>,
}

/// Global index ETF bundle, keyed by ticker (EZU, EWJ, EEM, SPY)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GlobalMarketsObservation {
    #[serde(rename = "global_markets")]
    pub markets: BTreeMap<String, InstrumentQuote>,
}

/// Sector ETF one-month returns, keyed by ticker, in percent
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SectorObservation {
    #[serde(flatten)]
    pub returns: BTreeMap<String, f64>,
}

/// Inline fetch failure
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FetchFailure {
    #[serde(rename = "error")]
    pub message: String,
}

/// One fetched indicator's outcome
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Observation {
    Scalar(ScalarObservation),
    MarginDebt(MarginDebtObservation),
    Sentiment(SentimentObservation),
    Metals(MetalsObservation),
    Crypto(CryptoObservation),
    GlobalMarkets(GlobalMarketsObservation),
    Sectors(SectorObservation),
    Error(FetchFailure),
}

impl Observation {
    /// Error-shaped observation from any failure message
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Error(FetchFailure {
            message: message.into(),
        })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Mapping from logical series name to observation.
///
/// Insertion order is preserved so the fetched-data digest lists results in
/// plan order. Absence of a key means the dimension is skipped, not scored,
/// and omitted from the insight list; an `Error` entry reads the same way to
/// every accessor.
#[derive(Clone, Debug, Default)]
pub struct ResultSet {
    entries: Vec<(String, Observation)>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the observation under `key`
    pub fn insert(&mut self, key: impl Into<String>, observation: Observation) {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = observation;
        } else {
            self.entries.push((key, observation));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Observation> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, obs)| obs)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Observation)> {
        self.entries.iter().map(|(k, o)| (k.as_str(), o))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Scalar observation under `key`, if present and scalar-shaped
    pub fn scalar(&self, key: &str) -> Option<&ScalarObservation> {
        match self.get(key) {
            Some(Observation::Scalar(s)) => Some(s),
            _ => None,
        }
    }

    /// Parsed scalar value; `None` when absent, error-shaped or unparseable
    pub fn scalar_value(&self, key: &str) -> Option<f64> {
        self.scalar(key).and_then(|s| s.value.as_f64())
    }

    pub fn sentiment(&self) -> Option<&SentimentObservation> {
        match self.get(crate::catalog::keys::MARKET_SENTIMENT) {
            Some(Observation::Sentiment(s)) => Some(s),
            _ => None,
        }
    }

    /// Metal quotes, `None` when absent, error-shaped or empty
    pub fn metals(&self) -> Option<&BTreeMap<String, InstrumentQuote>> {
        match self.get(crate::catalog::keys::METALS) {
            Some(Observation::Metals(m)) if !m.metals.is_empty() => Some(&m.metals),
            _ => None,
        }
    }

    pub fn crypto(&self) -> Option<&BTreeMap<String, CryptoQuote>> {
        match self.get(crate::catalog::keys::CRYPTO) {
            Some(Observation::Crypto(c)) if !c.crypto.is_empty() => Some(&c.crypto),
            _ => None,
        }
    }

    pub fn global_markets(&self) -> Option<&BTreeMap<String, InstrumentQuote>> {
        match self.get(crate::catalog::keys::GLOBAL_MARKETS) {
            Some(Observation::GlobalMarkets(g)) if !g.markets.is_empty() => Some(&g.markets),
            _ => None,
        }
    }

    pub fn sectors(&self) -> Option<&BTreeMap<String, f64>> {
        match self.get(crate::catalog::keys::SECTOR_PERFORMANCE) {
            Some(Observation::Sectors(s)) if !s.returns.is_empty() => Some(&s.returns),
            _ => None,
        }
    }

    pub fn margin_debt(&self) -> Option<&MarginDebtObservation> {
        match self.get(crate::catalog::keys::MARGIN_DEBT) {
            Some(Observation::MarginDebt(m)) => Some(m),
            _ => None,
        }
    }
}
