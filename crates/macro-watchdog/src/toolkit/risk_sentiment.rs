//! Risk Sentiment Tool
//!
//! Fetches market risk sentiment indicators:
//! - VIX (volatility index) as the fear proxy
//! - S&P 500 volume (market participation)
//! - HYG/TLT ratio (credit risk appetite)

use std::sync::Arc;

use async_trait::async_trait;

use audit_core::{Result as CoreResult, Tool, ToolCall, ToolSchema};

use crate::catalog::sentiment_symbols;
use crate::feeds::MarketDataSource;
use crate::observation::{Observation, SentimentObservation};

pub struct RiskSentimentTool {
    market: Arc<dyn MarketDataSource>,
}

impl RiskSentimentTool {
    pub fn new(market: Arc<dyn MarketDataSource>) -> Self {
        Self { market }
    }
}

#[async_trait]
impl Tool for RiskSentimentTool {
    type Output = Observation;

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "risk_sentiment".into(),
            description: "Fetch market risk sentiment: VIX, S&P 500 volume and the HYG/TLT credit risk ratio.".into(),
            parameters: Vec::new(),
            category: Some("risk".into()),
        }
    }

    async fn execute(&self, _call: &ToolCall) -> CoreResult<Observation> {
        let mut result = SentimentObservation {
            indicator: "Market Risk Sentiment".into(),
            vix: None,
            sp500_volume: None,
            risk_ratio: None,
            hyg_price: None,
        };

        // Each field degrades independently; a missing ticker leaves a None.
        if let Ok(vix) = self.market.latest_close(sentiment_symbols::VIX).await {
            result.vix = Some(round2(vix));
        }

        if let Ok(volume) = self.market.latest_volume(sentiment_symbols::SP500).await {
            result.sp500_volume = Some(volume);
        }

        let hyg = self.market.latest_close(sentiment_symbols::HIGH_YIELD).await;
        let tlt = self.market.latest_close(sentiment_symbols::TREASURIES).await;
        if let (Ok(hyg), Ok(tlt)) = (hyg, tlt) {
            if tlt != 0.0 {
                result.risk_ratio = Some(round4(hyg / tlt));
                result.hyg_price = Some(round2(hyg));
            }
        }

        Ok(Observation::Sentiment(result))
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::MockFeed;

    #[tokio::test]
    async fn sentiment_bundle_carries_ratio() {
        let tool = RiskSentimentTool::new(Arc::new(
            MockFeed::new()
                .with_quote("HYG", 80.0, 0.0)
                .with_quote("TLT", 100.0, 0.0),
        ));

        match tool.execute(&ToolCall::new("risk_sentiment")).await.unwrap() {
            Observation::Sentiment(s) => {
                assert_eq!(s.risk_ratio, Some(0.8));
                assert_eq!(s.hyg_price, Some(80.0));
                assert!(s.vix.is_some());
            }
            other => panic!("expected sentiment, got {other:?}"),
        }
    }
}
