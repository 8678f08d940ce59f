//! Daily Macro Audit CLI
//!
//! Runs the full audit plan against the live feeds and prints the report.
//! Pass `--offline` to run against the deterministic mock feed instead.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use macro_watchdog::feeds::{MacroSeriesSource, MarginDebtSource, MarketDataSource, MockFeed};
use macro_watchdog::MacroWatchdog;
use watchdog_feeds::{FinraClient, FredClient, YahooClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let offline = std::env::args().any(|arg| arg == "--offline");

    println!("--- Starting Daily Macro Audit ---");

    let watchdog = if offline {
        let feed = Arc::new(MockFeed::new());
        MacroWatchdog::new(feed.clone(), feed.clone(), feed)
    } else {
        if std::env::var("FRED_API_KEY").is_err() {
            println!("WARNING: FRED_API_KEY not found in environment.");
            println!("Data fetching tools will return errors.");
        }

        let series: Arc<dyn MacroSeriesSource> = Arc::new(FredClient::from_env());
        let market: Arc<dyn MarketDataSource> = Arc::new(YahooClient::new());
        let margin: Arc<dyn MarginDebtSource> = Arc::new(FinraClient::new());
        MacroWatchdog::new(series, market, margin)
    };

    let response = watchdog.run_audit().await;

    println!("\nDAILY MACRO REPORT:\n{}", response.text());
    println!("--- Audit Complete ---");

    Ok(())
}
