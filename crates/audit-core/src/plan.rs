//! Audit Plans
//!
//! A plan is a statically declared table mapping report sections to provider
//! tool calls. This replaces free-text "intent recognition" with an explicit
//! configuration: the set of data a given audit fetches is visible in one
//! place and identical on every run.

use serde::{Deserialize, Serialize};

use crate::tool::ToolCall;

/// One provider invocation: the result key it populates plus the call
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuditStep {
    /// Logical result-set key (series id or bundle name)
    pub key: String,

    /// The tool call that produces the observation
    pub call: ToolCall,
}

impl AuditStep {
    pub fn new(key: impl Into<String>, call: ToolCall) -> Self {
        Self {
            key: key.into(),
            call,
        }
    }
}

/// A titled group of steps, matching one section of the final report
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuditSection {
    /// Section title (for logging and progress display)
    pub title: String,

    /// Steps executed for this section, in declared order
    pub steps: Vec<AuditStep>,
}

impl AuditSection {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            steps: Vec::new(),
        }
    }

    pub fn step(mut self, key: impl Into<String>, call: ToolCall) -> Self {
        self.steps.push(AuditStep::new(key, call));
        self
    }
}

/// A complete, declaratively assembled audit
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuditPlan {
    /// Plan name (for logging)
    pub name: String,

    sections: Vec<AuditSection>,
}

impl AuditPlan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sections: Vec::new(),
        }
    }

    pub fn section(mut self, section: AuditSection) -> Self {
        self.sections.push(section);
        self
    }

    /// All sections in declared order
    pub fn sections(&self) -> &[AuditSection] {
        &self.sections
    }

    /// All steps across sections, in execution order
    pub fn steps(&self) -> impl Iterator<Item = &AuditStep> {
        self.sections.iter().flat_map(|s| s.steps.iter())
    }

    /// Total number of steps
    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.steps.len()).sum()
    }

    /// Check if the plan has no steps
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_preserves_declared_order() {
        let plan = AuditPlan::new("test")
            .section(
                AuditSection::new("First")
                    .step("A", ToolCall::new("fetch_a"))
                    .step("B", ToolCall::new("fetch_b")),
            )
            .section(AuditSection::new("Second").step("C", ToolCall::new("fetch_c")));

        assert_eq!(plan.len(), 3);
        let keys: Vec<_> = plan.steps().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, ["A", "B", "C"]);
    }

    #[test]
    fn empty_plan_is_empty() {
        let plan = AuditPlan::new("empty");
        assert!(plan.is_empty());
        assert_eq!(plan.sections().len(), 0);
    }
}
