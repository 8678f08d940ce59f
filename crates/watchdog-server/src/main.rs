//! macro-watchdog HTTP Server
//!
//! Axum-based dashboard backend: runs the daily audit on demand and serves
//! the historical series the dashboard charts.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use macro_watchdog::feeds::{MacroSeriesSource, MarginDebtSource, MarketDataSource};
use macro_watchdog::MacroWatchdog;
use watchdog_feeds::{FinraClient, FredClient, YahooClient};

use crate::handlers::{
    global_history, health_check, margin_history, market_history, metals_history, run_audit,
    sectors_history, series_history,
};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    if std::env::var("FRED_API_KEY").is_err() {
        tracing::warn!("⚠ FRED_API_KEY not found in environment");
        tracing::warn!("  Macro series fetches will return errors");
    }

    // Data feeds
    let series: Arc<dyn MacroSeriesSource> = Arc::new(FredClient::from_env());
    let market: Arc<dyn MarketDataSource> = Arc::new(YahooClient::new());
    let margin: Arc<dyn MarginDebtSource> = Arc::new(FinraClient::new());

    // The audit agent
    let watchdog = Arc::new(MacroWatchdog::new(
        series.clone(),
        market.clone(),
        margin.clone(),
    ));

    tracing::info!("Registered {} tools:", watchdog.tools().len());
    for name in watchdog.tools().names() {
        tracing::info!("  • {}", name);
    }

    let state = AppState {
        watchdog,
        series,
        market,
        margin,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/audit", post(run_audit))
        .route("/api/history/series/{series_id}", get(series_history))
        .route("/api/history/margin-debt", get(margin_history))
        .route("/api/history/metals", get(metals_history))
        .route("/api/history/market", get(market_history))
        .route("/api/history/sectors", get(sectors_history))
        .route("/api/history/global/{ticker}", get(global_history))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("📉 macro-watchdog server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                        - Health check");
    tracing::info!("  POST /api/audit                     - Run the daily macro audit");
    tracing::info!("  GET  /api/history/series/{{id}}       - Macro series history");
    tracing::info!("  GET  /api/history/margin-debt       - FINRA margin debt history");
    tracing::info!("  GET  /api/history/metals            - Metal futures history");
    tracing::info!("  GET  /api/history/market            - VIX / HYG / TLT history");
    tracing::info!("  GET  /api/history/sectors           - Sector ETF history");
    tracing::info!("  GET  /api/history/global/{{ticker}}   - Global & crypto history");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
