//! # macro-watchdog
//!
//! Contrarian macro-economic audit agent with deterministic health scoring.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       MacroWatchdog                          │
//! │  ┌────────────┐  ┌────────────┐  ┌────────────────────────┐  │
//! │  │ AuditPlan  │  │  Toolkit   │  │  Feeds (FRED, market   │  │
//! │  │ (declared) │──│ (7 tools)  │──│  data, FINRA margin)   │  │
//! │  └────────────┘  └────────────┘  └────────────────────────┘  │
//! │         │                                                    │
//! │         ▼                                                    │
//! │  ┌────────────┐        ┌───────────────────────────────┐     │
//! │  │ ResultSet  │───────▶│ synthesize() -> Report        │     │
//! │  └────────────┘        └───────────────────────────────┘     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Philosophy
//!
//! The watchdog is deliberately contrarian: it weighs structural drags
//! (debt-to-GDP, trapped liquidity, inverted curves) against momentum
//! signals (industrial production, credit appetite, sector rotation) and
//! refuses to be optimistic just because prices are rising.
//!
//! - **Deterministic over clever** - the score is a fixed rule table, not a
//!   model; the same inputs always produce the same report
//! - **Absence tolerance** - a dead feed silently drops its dimension
//!   instead of failing the audit
//! - **Declared data universe** - the audit plan is a static table; what
//!   gets fetched is visible in one place and identical on every run

pub mod agent;
pub mod analysis;
pub mod catalog;
pub mod error;
pub mod feeds;
pub mod observation;
pub mod plan;
pub mod report;
pub mod toolkit;

pub use agent::{AuditResponse, MacroWatchdog};
pub use analysis::{synthesize, Recommendation, Verdict};
pub use error::{Result, WatchdogError};
pub use observation::{Observation, ResultSet};
pub use plan::daily_audit_plan;
pub use report::Report;
