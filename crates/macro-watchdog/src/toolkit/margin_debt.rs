//! Margin Debt Tool
//!
//! Fetches the latest FINRA margin statistics reading.

use std::sync::Arc;

use async_trait::async_trait;

use audit_core::{Result as CoreResult, Tool, ToolCall, ToolSchema};

use crate::feeds::MarginDebtSource;
use crate::observation::Observation;

/// Tool for the latest debit balances in customers' margin accounts
pub struct MarginDebtTool {
    source: Arc<dyn MarginDebtSource>,
}

impl MarginDebtTool {
    pub fn new(source: Arc<dyn MarginDebtSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Tool for MarginDebtTool {
    type Output = Observation;

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "margin_debt".into(),
            description: "Fetch the latest FINRA margin debt statistics (debit balances in customers' securities margin accounts).".into(),
            parameters: Vec::new(),
            category: Some("leverage".into()),
        }
    }

    async fn execute(&self, _call: &ToolCall) -> CoreResult<Observation> {
        match self.source.latest().await {
            Ok(obs) => Ok(Observation::MarginDebt(obs)),
            Err(e) => {
                tracing::warn!(error = %e, "Margin statistics fetch failed");
                Ok(Observation::failure(
                    "Could not fetch Margin Statistics from FINRA.",
                ))
            }
        }
    }
}
