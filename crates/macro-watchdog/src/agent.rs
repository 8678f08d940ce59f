//! The Macro Watchdog Agent
//!
//! Binds the declarative daily plan, the tool registry and the synthesis
//! engine. Running an audit executes every plan step in order, aggregates
//! the observations (step failures become error-shaped observations under
//! their key) and synthesizes the report.

use std::sync::Arc;

use audit_core::{AuditPlan, AuditRunner, ToolRegistry};
use chrono::{DateTime, Utc};

use crate::analysis::synthesize;
use crate::feeds::{MacroSeriesSource, MarginDebtSource, MarketDataSource};
use crate::observation::{Observation, ResultSet};
use crate::plan::daily_audit_plan;
use crate::report::{digest, Report};
use crate::toolkit::{
    CryptoPricesTool, GlobalIndicesTool, MacroIndicatorTool, MarginDebtTool, MetalPricesTool,
    RiskSentimentTool, SectorPerformanceTool,
};

/// Outcome of one audit run
#[derive(Clone, Debug)]
pub struct AuditResponse {
    /// Aggregated observations, in plan order
    pub results: ResultSet,

    /// The synthesized report
    pub report: Report,

    /// When the audit finished
    pub generated_at: DateTime<Utc>,
}

impl AuditResponse {
    /// Full response text: fetched-data digest followed by the assessment
    pub fn text(&self) -> String {
        format!(
            "{}\n[MacroWatchdog Assessment]:\n{}",
            digest(&self.results),
            self.report.render()
        )
    }
}

/// Contrarian macro audit agent
pub struct MacroWatchdog {
    name: String,
    tools: Arc<ToolRegistry<Observation>>,
    plan: AuditPlan,
}

impl MacroWatchdog {
    /// Build the watchdog with the standard daily plan
    pub fn new(
        series: Arc<dyn MacroSeriesSource>,
        market: Arc<dyn MarketDataSource>,
        margin: Arc<dyn MarginDebtSource>,
    ) -> Self {
        Self::with_plan(series, market, margin, daily_audit_plan())
    }

    /// Build the watchdog with a custom plan
    pub fn with_plan(
        series: Arc<dyn MacroSeriesSource>,
        market: Arc<dyn MarketDataSource>,
        margin: Arc<dyn MarginDebtSource>,
        plan: AuditPlan,
    ) -> Self {
        let mut tools = ToolRegistry::new();
        tools.register(MacroIndicatorTool::new(series));
        tools.register(MarginDebtTool::new(margin));
        tools.register(RiskSentimentTool::new(market.clone()));
        tools.register(MetalPricesTool::new(market.clone()));
        tools.register(CryptoPricesTool::new(market.clone()));
        tools.register(GlobalIndicesTool::new(market.clone()));
        tools.register(SectorPerformanceTool::new(market));

        Self {
            name: "MacroWatchdog".into(),
            tools: Arc::new(tools),
            plan,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn plan(&self) -> &AuditPlan {
        &self.plan
    }

    pub fn tools(&self) -> &ToolRegistry<Observation> {
        &self.tools
    }

    /// Execute the plan and synthesize a report.
    ///
    /// Provider calls run strictly one after another. A failed step lands in
    /// the result set as an error-shaped observation under its key; the
    /// engine then treats it like any other absent dimension.
    pub async fn run_audit(&self) -> AuditResponse {
        tracing::info!(agent = %self.name, "Processing audit request");

        let runner = AuditRunner::new(self.tools.clone());
        let outcomes = runner.run(&self.plan).await;

        let mut results = ResultSet::new();
        for outcome in outcomes {
            let observation = outcome
                .result
                .unwrap_or_else(|e| Observation::failure(e.to_string()));
            results.insert(outcome.key, observation);
        }

        let report = synthesize(&results);

        AuditResponse {
            results,
            report,
            generated_at: Utc::now(),
        }
    }
}
