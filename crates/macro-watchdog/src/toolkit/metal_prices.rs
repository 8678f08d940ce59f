//! Metal Prices Tool
//!
//! Fetches recent price action for key metals to detect liquidity and
//! deleveraging spikes. Assets: Gold, Silver, Copper, Platinum futures.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use audit_core::{Result as CoreResult, Tool, ToolCall, ToolSchema};

use crate::catalog::METAL_SYMBOLS;
use crate::feeds::MarketDataSource;
use crate::observation::{MetalsObservation, Observation};

pub struct MetalPricesTool {
    market: Arc<dyn MarketDataSource>,
}

impl MetalPricesTool {
    pub fn new(market: Arc<dyn MarketDataSource>) -> Self {
        Self { market }
    }
}

#[async_trait]
impl Tool for MetalPricesTool {
    type Output = Observation;

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "metal_prices".into(),
            description: "Fetch latest price and 5-day percent change for Gold, Silver, Copper and Platinum futures.".into(),
            parameters: Vec::new(),
            category: Some("commodities".into()),
        }
    }

    async fn execute(&self, _call: &ToolCall) -> CoreResult<Observation> {
        let mut metals = BTreeMap::new();

        for (symbol, name) in METAL_SYMBOLS {
            // A symbol missing from the feed is skipped, not fatal.
            match self.market.five_day_change(symbol).await {
                Ok(quote) => {
                    metals.insert((*name).to_string(), quote);
                }
                Err(e) => {
                    tracing::debug!(symbol, error = %e, "Metal quote unavailable");
                }
            }
        }

        if metals.is_empty() {
            return Ok(Observation::failure("Failed to fetch metals data."));
        }

        Ok(Observation::Metals(MetalsObservation {
            indicator: "Metal Commodities".into(),
            metals,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::MockFeed;

    #[tokio::test]
    async fn metals_are_keyed_by_display_name() {
        let tool = MetalPricesTool::new(Arc::new(MockFeed::new()));

        match tool.execute(&ToolCall::new("metal_prices")).await.unwrap() {
            Observation::Metals(m) => {
                assert!(m.metals.contains_key("Gold"));
                assert!(m.metals.contains_key("Copper"));
                assert_eq!(m.metals.len(), 4);
            }
            other => panic!("expected metals, got {other:?}"),
        }
    }
}
