//! Crypto Prices Tool
//!
//! Fetches current price and five-day trend for crypto assets. Used as a
//! pure risk gauge, not an allocation universe.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use audit_core::{Result as CoreResult, Tool, ToolCall, ToolSchema};

use crate::catalog::CRYPTO_SYMBOLS;
use crate::feeds::MarketDataSource;
use crate::observation::{CryptoObservation, CryptoQuote, Observation, Trend};

pub struct CryptoPricesTool {
    market: Arc<dyn MarketDataSource>,
}

impl CryptoPricesTool {
    pub fn new(market: Arc<dyn MarketDataSource>) -> Self {
        Self { market }
    }
}

#[async_trait]
impl Tool for CryptoPricesTool {
    type Output = Observation;

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "crypto_prices".into(),
            description: "Fetch current price, 5-day change and trend for BTC and ETH.".into(),
            parameters: Vec::new(),
            category: Some("crypto".into()),
        }
    }

    async fn execute(&self, _call: &ToolCall) -> CoreResult<Observation> {
        let mut crypto = BTreeMap::new();

        for symbol in CRYPTO_SYMBOLS {
            match self.market.five_day_change(symbol).await {
                Ok(quote) => {
                    let trend = if quote.change_5d_pct > 0.0 {
                        Trend::Bullish
                    } else {
                        Trend::Bearish
                    };
                    crypto.insert(
                        (*symbol).to_string(),
                        CryptoQuote {
                            price: quote.price,
                            change_5d_pct: quote.change_5d_pct,
                            trend,
                        },
                    );
                }
                Err(e) => {
                    tracing::debug!(symbol, error = %e, "Crypto quote unavailable");
                }
            }
        }

        if crypto.is_empty() {
            return Ok(Observation::failure("Failed to fetch crypto."));
        }

        Ok(Observation::Crypto(CryptoObservation { crypto }))
    }
}
