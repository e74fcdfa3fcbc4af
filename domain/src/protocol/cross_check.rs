//! Cross-check results
//!
//! A cross-check is one agent judging another agent's output. The
//! orchestrator collects these after a successful dispatch and feeds
//! them into workflow-level error/warning policy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Verdict of a single cross-check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationResult {
    Valid,
    Invalid,
    Pending,
    NeedsReview,
}

impl ValidationResult {
    pub fn is_invalid(&self) -> bool {
        matches!(self, ValidationResult::Invalid)
    }
}

/// One validator agent's judgement of another agent's payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossCheckResult {
    /// Agent that performed the check
    pub validator_agent: String,
    /// The verdict
    pub result: ValidationResult,
    /// Human-readable reasoning
    pub notes: String,
    /// Suggested fixes, keyed by the field they correct
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub corrections: Map<String, Value>,
    pub timestamp: DateTime<Utc>,
}

impl CrossCheckResult {
    pub fn new(
        validator_agent: impl Into<String>,
        result: ValidationResult,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            validator_agent: validator_agent.into(),
            result,
            notes: notes.into(),
            corrections: Map::new(),
            timestamp: Utc::now(),
        }
    }

    /// Create a passing check
    pub fn valid(validator_agent: impl Into<String>, notes: impl Into<String>) -> Self {
        Self::new(validator_agent, ValidationResult::Valid, notes)
    }

    /// Create a failing check
    pub fn invalid(validator_agent: impl Into<String>, notes: impl Into<String>) -> Self {
        Self::new(validator_agent, ValidationResult::Invalid, notes)
    }

    /// Create a check that needs human review
    pub fn needs_review(validator_agent: impl Into<String>, notes: impl Into<String>) -> Self {
        Self::new(validator_agent, ValidationResult::NeedsReview, notes)
    }

    /// Attach a suggested correction
    pub fn with_correction(mut self, field: impl Into<String>, value: Value) -> Self {
        self.corrections.insert(field.into(), value);
        self
    }

    pub fn is_invalid(&self) -> bool {
        self.result.is_invalid()
    }
}
