//! Sector Performance Tool
//!
//! Fetches recent (one-month) performance for the major sector ETFs, used to
//! detect rotation between defensive and growth positioning.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use audit_core::{Result as CoreResult, Tool, ToolCall, ToolSchema};

use crate::catalog::SECTOR_SYMBOLS;
use crate::feeds::MarketDataSource;
use crate::observation::{Observation, SectorObservation};

pub struct SectorPerformanceTool {
    market: Arc<dyn MarketDataSource>,
}

impl SectorPerformanceTool {
    pub fn new(market: Arc<dyn MarketDataSource>) -> Self {
        Self { market }
    }
}

#[async_trait]
impl Tool for SectorPerformanceTool {
    type Output = Observation;

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "sector_performance".into(),
            description: "Fetch 1-month percent returns for the major sector ETFs (XLK, XLE, XLP, XLU, XLV, XLY, XLI) and SPY.".into(),
            parameters: Vec::new(),
            category: Some("sectors".into()),
        }
    }

    async fn execute(&self, _call: &ToolCall) -> CoreResult<Observation> {
        let mut returns = BTreeMap::new();

        for symbol in SECTOR_SYMBOLS {
            match self.market.monthly_return(symbol).await {
                Ok(pct) => {
                    returns.insert((*symbol).to_string(), pct);
                }
                Err(e) => {
                    tracing::debug!(symbol, error = %e, "Sector return unavailable");
                }
            }
        }

        if returns.is_empty() {
            return Ok(Observation::failure("Failed to fetch sector performance."));
        }

        Ok(Observation::Sectors(SectorObservation { returns }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::MockFeed;

    #[tokio::test]
    async fn returns_cover_the_sector_universe() {
        let tool = SectorPerformanceTool::new(Arc::new(MockFeed::new()));

        match tool
            .execute(&ToolCall::new("sector_performance"))
            .await
            .unwrap()
        {
            Observation::Sectors(s) => {
                assert_eq!(s.returns.len(), SECTOR_SYMBOLS.len());
                assert!(s.returns.contains_key("SPY"));
            }
            other => panic!("expected sectors, got {other:?}"),
        }
    }
}
