//! Global Indices Tool
//!
//! Fetches major global ETFs to detect divergences against the US market.
//! EZU: Eurozone, EWJ: Japan, EEM: Emerging Markets, SPY for comparison.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use audit_core::{Result as CoreResult, Tool, ToolCall, ToolSchema};

use crate::catalog::GLOBAL_SYMBOLS;
use crate::feeds::MarketDataSource;
use crate::observation::{GlobalMarketsObservation, Observation};

pub struct GlobalIndicesTool {
    market: Arc<dyn MarketDataSource>,
}

impl GlobalIndicesTool {
    pub fn new(market: Arc<dyn MarketDataSource>) -> Self {
        Self { market }
    }
}

#[async_trait]
impl Tool for GlobalIndicesTool {
    type Output = Observation;

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "global_indices".into(),
            description: "Fetch 5-day moves for EZU, EWJ, EEM and SPY to detect global divergences.".into(),
            parameters: Vec::new(),
            category: Some("global".into()),
        }
    }

    async fn execute(&self, _call: &ToolCall) -> CoreResult<Observation> {
        let mut markets = BTreeMap::new();

        for symbol in GLOBAL_SYMBOLS {
            match self.market.five_day_change(symbol).await {
                Ok(quote) => {
                    markets.insert((*symbol).to_string(), quote);
                }
                Err(e) => {
                    tracing::debug!(symbol, error = %e, "Global quote unavailable");
                }
            }
        }

        if markets.is_empty() {
            return Ok(Observation::failure("Failed to fetch global markets."));
        }

        Ok(Observation::GlobalMarkets(GlobalMarketsObservation {
            markets,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::MockFeed;

    #[tokio::test]
    async fn bundle_includes_spy_benchmark() {
        let tool = GlobalIndicesTool::new(Arc::new(MockFeed::new()));

        match tool.execute(&ToolCall::new("global_indices")).await.unwrap() {
            Observation::GlobalMarkets(g) => {
                assert!(g.markets.contains_key("SPY"));
                assert!(g.markets.contains_key("EZU"));
            }
            other => panic!("expected global markets, got {other:?}"),
        }
    }
}
