//! Macro Indicator Tool
//!
//! Fetches the latest value of a single macro time series.

use std::sync::Arc;

use async_trait::async_trait;

use audit_core::{ParameterSchema, Result as CoreResult, Tool, ToolCall, ToolSchema};

use crate::feeds::MacroSeriesSource;
use crate::observation::Observation;

/// Tool for looking up the latest observation of a macro series
pub struct MacroIndicatorTool {
    series: Arc<dyn MacroSeriesSource>,
}

impl MacroIndicatorTool {
    pub fn new(series: Arc<dyn MacroSeriesSource>) -> Self {
        Self { series }
    }
}

#[async_trait]
impl Tool for MacroIndicatorTool {
    type Output = Observation;

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "macro_indicator".into(),
            description: "Fetch the latest value for a specific macro data series (Debt-to-GDP, M2, yield curve, ...).".into(),
            parameters: vec![ParameterSchema {
                name: "series_id".into(),
                param_type: "string".into(),
                description: "Series identifier, e.g. 'GFDEGDQ188S' or 'INDPRO'".into(),
                required: true,
                default: None,
            }],
            category: Some("macro".into()),
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<Observation> {
        let series_id = call.str_arg("series_id").unwrap_or_default();

        match self.series.latest(series_id).await {
            Ok(obs) => Ok(Observation::Scalar(obs)),
            Err(e) => Ok(Observation::failure(format!(
                "Failed to fetch series data: {e}"
            ))),
        }
    }
}
