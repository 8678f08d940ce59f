//! Tool Kit
//!
//! Provider tools that implement `audit_core::Tool` for the macro watchdog.
//! Every tool converts an upstream fetch failure into an error-shaped
//! `Observation` rather than propagating it, so a dead feed degrades the
//! report instead of aborting the audit.

mod crypto_prices;
mod global_indices;
mod macro_indicator;
mod margin_debt;
mod metal_prices;
mod risk_sentiment;
mod sector_performance;

pub use crypto_prices::CryptoPricesTool;
pub use global_indices::GlobalIndicesTool;
pub use macro_indicator::MacroIndicatorTool;
pub use margin_debt::MarginDebtTool;
pub use metal_prices::MetalPricesTool;
pub use risk_sentiment::RiskSentimentTool;
pub use sector_performance::SectorPerformanceTool;
