//! Daily Audit Plan
//!
//! The statically declared table of everything the daily macro audit
//! fetches. Each section maps to one part of the final report; each step
//! names the result-set key it populates and the tool call that produces it.

use audit_core::{AuditPlan, AuditSection, ToolCall};

use crate::catalog::keys;

fn series_call(series_id: &str) -> ToolCall {
    ToolCall::new("macro_indicator").with_arg("series_id", series_id)
}

/// The full daily macro audit
pub fn daily_audit_plan() -> AuditPlan {
    AuditPlan::new("daily-macro-audit")
        .section(
            AuditSection::new("Core Economy")
                .step(keys::DEBT_TO_GDP, series_call(keys::DEBT_TO_GDP))
                .step(keys::FED_FUNDS, series_call(keys::FED_FUNDS))
                .step(
                    keys::INDUSTRIAL_PRODUCTION,
                    series_call(keys::INDUSTRIAL_PRODUCTION),
                ),
        )
        .section(
            AuditSection::new("Liquidity")
                .step(keys::M2, series_call(keys::M2))
                .step(keys::REVERSE_REPO, series_call(keys::REVERSE_REPO)),
        )
        .section(
            AuditSection::new("Housing")
                .step(keys::HOUSING_STARTS, series_call(keys::HOUSING_STARTS))
                .step(keys::MORTGAGE_RATE, series_call(keys::MORTGAGE_RATE)),
        )
        .section(
            AuditSection::new("Recession Signals")
                .step(keys::YIELD_CURVE, series_call(keys::YIELD_CURVE))
                .step(
                    keys::CONSUMER_SENTIMENT,
                    series_call(keys::CONSUMER_SENTIMENT),
                )
                .step(keys::UNEMPLOYMENT, series_call(keys::UNEMPLOYMENT)),
        )
        .section(
            AuditSection::new("Leverage & Risk")
                .step(keys::MARGIN_DEBT, ToolCall::new("margin_debt"))
                .step(keys::MARKET_SENTIMENT, ToolCall::new("risk_sentiment")),
        )
        .section(AuditSection::new("Commodities").step(keys::METALS, ToolCall::new("metal_prices")))
        .section(
            AuditSection::new("Sector Rotation")
                .step(keys::SECTOR_PERFORMANCE, ToolCall::new("sector_performance")),
        )
        .section(
            AuditSection::new("Global & Crypto")
                .step(keys::CRYPTO, ToolCall::new("crypto_prices"))
                .step(keys::GLOBAL_MARKETS, ToolCall::new("global_indices")),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_covers_every_engine_key() {
        let plan = daily_audit_plan();
        let step_keys: Vec<_> = plan.steps().map(|s| s.key.as_str()).collect();

        for key in [
            keys::DEBT_TO_GDP,
            keys::INDUSTRIAL_PRODUCTION,
            keys::M2,
            keys::REVERSE_REPO,
            keys::HOUSING_STARTS,
            keys::MORTGAGE_RATE,
            keys::YIELD_CURVE,
            keys::CONSUMER_SENTIMENT,
            keys::MARGIN_DEBT,
            keys::MARKET_SENTIMENT,
            keys::METALS,
            keys::CRYPTO,
            keys::GLOBAL_MARKETS,
            keys::SECTOR_PERFORMANCE,
        ] {
            assert!(step_keys.contains(&key), "plan is missing {key}");
        }
    }

    #[test]
    fn scalar_steps_carry_series_id_argument() {
        let plan = daily_audit_plan();
        for step in plan.steps() {
            if step.call.name == "macro_indicator" {
                assert_eq!(step.call.str_arg("series_id"), Some(step.key.as_str()));
            }
        }
    }
}
