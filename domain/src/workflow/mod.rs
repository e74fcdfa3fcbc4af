//! Workflow results
//!
//! A workflow is a named, multi-step composition of agent dispatches
//! producing one aggregated [`WorkflowResult`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::protocol::cross_check::CrossCheckResult;

/// The kinds of workflow the orchestrator composes.
///
/// `DocumentGeneration` and `ComplianceCheck` are declared for
/// protocol completeness but no orchestrator path constructs them
/// today; document generation and compliance checks run as steps
/// inside the other workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowType {
    Query,
    Onboarding,
    OfferAcceptance,
    OfferRejection,
    DocumentGeneration,
    Calculation,
    ComplianceCheck,
}

impl WorkflowType {
    pub fn as_str(&self) -> &str {
        match self {
            WorkflowType::Query => "query",
            WorkflowType::Onboarding => "onboarding",
            WorkflowType::OfferAcceptance => "offer_acceptance",
            WorkflowType::OfferRejection => "offer_rejection",
            WorkflowType::DocumentGeneration => "document_generation",
            WorkflowType::Calculation => "calculation",
            WorkflowType::ComplianceCheck => "compliance_check",
        }
    }
}

impl std::fmt::Display for WorkflowType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregated outcome of one workflow run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowResult {
    pub success: bool,
    pub workflow_type: WorkflowType,
    pub data: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cross_checks: Vec<CrossCheckResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Every agent that took part, deduplicated, in first-touch order
    pub agents_involved: Vec<String>,
}

impl WorkflowResult {
    pub fn new(workflow_type: WorkflowType) -> Self {
        Self {
            success: false,
            workflow_type,
            data: Value::Null,
            cross_checks: Vec::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
            agents_involved: Vec::new(),
        }
    }

    pub fn push_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Record an agent's involvement, keeping the list deduplicated
    pub fn involve_agent(&mut self, agent: &str) {
        if !self.agents_involved.iter().any(|a| a == agent) {
            self.agents_involved.push(agent.to_string());
        }
    }

    /// Recompute the success flag: true iff no errors accumulated
    pub fn finalize(&mut self) {
        self.success = self.errors.is_empty();
    }
}
