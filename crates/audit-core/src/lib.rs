//! # audit-core
//!
//! Core audit machinery with a typed tool system and declarative audit plans.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      AuditRunner                             │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │  AuditPlan  │  │    Tools    │  │   Tool<Output = O>  │  │
//! │  │  (declared) │──│   Registry  │──│   (Strategy)        │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! An `AuditPlan` is a statically declared table mapping report sections to
//! the tool calls that populate them. The runner walks the plan in order and
//! awaits each call before the next one starts; there is no parallel fan-out,
//! no retry and no backoff. The `Tool` trait carries a typed `Output`, so a
//! registry built for one domain only ever yields that domain's observation
//! type.

pub mod error;
pub mod plan;
pub mod runner;
pub mod tool;

pub use error::{AuditError, Result};
pub use plan::{AuditPlan, AuditSection, AuditStep};
pub use runner::{AuditRunner, StepOutcome};
pub use tool::{ParameterSchema, Tool, ToolCall, ToolRegistry, ToolSchema};
