//! HTTP Handlers

use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use macro_watchdog::catalog::{sentiment_symbols, METAL_SYMBOLS, SECTOR_SYMBOLS};
use macro_watchdog::error::WatchdogError;
use macro_watchdog::feeds::{HistoryPoint, HistoryRange};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct AuditResponseBody {
    pub score: i32,
    pub verdict: String,
    pub factors: Vec<String>,
    pub sector_notes: Vec<String>,
    pub allocations: Vec<String>,
    pub synthesis: String,
    pub path_forward: String,
    /// Full rendered response (digest + assessment)
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn feed_error(err: &WatchdogError) -> ApiError {
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse {
            error: err.to_string(),
            code: "FEED_ERROR".into(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Run the daily audit and return the synthesized report
pub async fn run_audit(State(state): State<AppState>) -> Json<AuditResponseBody> {
    let response = state.watchdog.run_audit().await;
    let text = response.text();
    let report = response.report;

    Json(AuditResponseBody {
        score: report.score,
        verdict: report.verdict.to_string(),
        factors: report.factors,
        sector_notes: report.sector_notes,
        allocations: report
            .allocations
            .iter()
            .map(ToString::to_string)
            .collect(),
        synthesis: report.synthesis,
        path_forward: report.path_forward,
        text,
    })
}

/// History for one macro series (`?limit=` caps the number of observations)
pub async fn series_history(
    State(state): State<AppState>,
    Path(series_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<HistoryPoint>>, ApiError> {
    let limit = query.limit.unwrap_or(60);

    state
        .series
        .history(&series_id, limit)
        .await
        .map(Json)
        .map_err(|e| feed_error(&e))
}

/// Margin-debt monthly history (default: five years)
pub async fn margin_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<HistoryPoint>>, ApiError> {
    let limit = query.limit.unwrap_or(60);

    state
        .margin
        .history(limit)
        .await
        .map(Json)
        .map_err(|e| feed_error(&e))
}

/// Five-year metal futures history, keyed by metal name
pub async fn metals_history(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, Vec<HistoryPoint>>>, ApiError> {
    let mut out = BTreeMap::new();

    for (symbol, name) in METAL_SYMBOLS {
        match state.market.close_history(symbol, HistoryRange::FiveYears).await {
            Ok(points) => {
                out.insert((*name).to_string(), points);
            }
            Err(e) => {
                tracing::warn!(symbol, error = %e, "Metal history unavailable");
            }
        }
    }

    if out.is_empty() {
        return Err(feed_error(&WatchdogError::Feed(
            "no metal history available".into(),
        )));
    }

    Ok(Json(out))
}

#[derive(Serialize)]
pub struct MarketHistoryBody {
    pub vix: Vec<HistoryPoint>,
    pub hyg: Vec<HistoryPoint>,
    pub tlt: Vec<HistoryPoint>,
    /// HYG/TLT, paired by date
    pub risk_ratio: Vec<HistoryPoint>,
}

/// Five-year risk-appetite history: VIX, HYG, TLT and the HYG/TLT ratio
pub async fn market_history(
    State(state): State<AppState>,
) -> Result<Json<MarketHistoryBody>, ApiError> {
    let vix = state
        .market
        .close_history(sentiment_symbols::VIX, HistoryRange::FiveYears)
        .await
        .map_err(|e| feed_error(&e))?;
    let hyg = state
        .market
        .close_history(sentiment_symbols::HIGH_YIELD, HistoryRange::FiveYears)
        .await
        .map_err(|e| feed_error(&e))?;
    let tlt = state
        .market
        .close_history(sentiment_symbols::TREASURIES, HistoryRange::FiveYears)
        .await
        .map_err(|e| feed_error(&e))?;

    let risk_ratio = risk_ratio_series(&hyg, &tlt);

    Ok(Json(MarketHistoryBody {
        vix,
        hyg,
        tlt,
        risk_ratio,
    }))
}

/// Pair HYG and TLT closes by date and divide
fn risk_ratio_series(hyg: &[HistoryPoint], tlt: &[HistoryPoint]) -> Vec<HistoryPoint> {
    let tlt_by_date: BTreeMap<&str, f64> =
        tlt.iter().map(|p| (p.date.as_str(), p.value)).collect();

    hyg.iter()
        .filter_map(|p| {
            let tlt_close = *tlt_by_date.get(p.date.as_str())?;
            if tlt_close == 0.0 {
                return None;
            }
            Some(HistoryPoint::new(p.date.clone(), p.value / tlt_close))
        })
        .collect()
}

/// Five-year sector ETF history, keyed by ticker
pub async fn sectors_history(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, Vec<HistoryPoint>>>, ApiError> {
    let mut out = BTreeMap::new();

    for symbol in SECTOR_SYMBOLS {
        match state.market.close_history(symbol, HistoryRange::FiveYears).await {
            Ok(points) => {
                out.insert((*symbol).to_string(), points);
            }
            Err(e) => {
                tracing::warn!(symbol, error = %e, "Sector history unavailable");
            }
        }
    }

    if out.is_empty() {
        return Err(feed_error(&WatchdogError::Feed(
            "no sector history available".into(),
        )));
    }

    Ok(Json(out))
}

/// Two-year close history for a global or crypto ticker
pub async fn global_history(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<Vec<HistoryPoint>>, ApiError> {
    state
        .market
        .close_history(&ticker, HistoryRange::TwoYears)
        .await
        .map(Json)
        .map_err(|e| feed_error(&e))
}
