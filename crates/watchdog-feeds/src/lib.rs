//! # watchdog-feeds
//!
//! Real data-source integrations for the macro watchdog:
//!
//! - [`FredClient`] - FRED series observations (latest value + history)
//! - [`YahooClient`] - Yahoo Finance chart API (quotes, 5-day moves,
//!   monthly sector returns, chart histories)
//! - [`FinraClient`] - FINRA margin statistics (HTML table extraction)
//!
//! Each client implements the corresponding `macro_watchdog::feeds` trait.
//! Calls are plain one-shot HTTP requests: no retry, no backoff, no rate
//! limiting. A failed call surfaces as a `WatchdogError` and the audit layer
//! degrades it into an error-shaped observation.

mod finra;
mod fred;
mod yahoo;

pub use finra::FinraClient;
pub use fred::{FredClient, FredConfig};
pub use yahoo::YahooClient;
