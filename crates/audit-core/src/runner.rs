//! Audit Runner
//!
//! Walks an `AuditPlan` section by section and executes every step through
//! the tool registry. Calls are awaited one after another; a step that fails
//! is recorded under its key and the run continues with the next step.

use std::sync::Arc;

use crate::error::Result;
use crate::plan::AuditPlan;
use crate::tool::ToolRegistry;

/// Outcome of a single plan step
#[derive(Debug)]
pub struct StepOutcome<O> {
    /// Result-set key this step populates
    pub key: String,

    /// Title of the section the step belongs to
    pub section: String,

    /// The tool's observation, or the error that prevented one
    pub result: Result<O>,
}

/// Sequential plan executor
pub struct AuditRunner<O> {
    tools: Arc<ToolRegistry<O>>,
}

impl<O: Send> AuditRunner<O> {
    pub fn new(tools: Arc<ToolRegistry<O>>) -> Self {
        Self { tools }
    }

    /// Run every step of the plan in declared order.
    ///
    /// Returns one outcome per step, in execution order. Never short-circuits:
    /// a failing step contributes an `Err` outcome and the remaining steps
    /// still run.
    pub async fn run(&self, plan: &AuditPlan) -> Vec<StepOutcome<O>> {
        tracing::info!(plan = %plan.name, steps = plan.len(), "Starting audit run");

        let mut outcomes = Vec::with_capacity(plan.len());

        for section in plan.sections() {
            tracing::debug!(section = %section.title, "Entering section");

            for step in &section.steps {
                tracing::debug!(tool = %step.call.name, key = %step.key, "Executing tool");

                let result = self.tools.execute(&step.call).await;

                if let Err(e) = &result {
                    tracing::warn!(key = %step.key, error = %e, "Step failed");
                }

                outcomes.push(StepOutcome {
                    key: step.key.clone(),
                    section: section.title.clone(),
                    result,
                });
            }
        }

        tracing::info!(plan = %plan.name, "Audit run complete");
        outcomes
    }

    /// Access the underlying registry
    pub fn tools(&self) -> &ToolRegistry<O> {
        &self.tools
    }
}
