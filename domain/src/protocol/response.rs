//! Agent responses
//!
//! Every agent call returns an [`AgentResponse`], success or failure,
//! never a panic and never a propagated error. Failures carry their
//! reason in `errors`; callers must read `errors` and `warnings`, not
//! just `success`, to know the true state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::cross_check::CrossCheckResult;

/// Result of delivering one [`AgentMessage`](super::message::AgentMessage)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    pub success: bool,
    /// Handler output on success; `Value::Null` on failure
    pub payload: Value,
    /// Agent that produced this response
    pub source_agent: String,
    pub timestamp: DateTime<Utc>,
    /// Cross-check verdicts attached by the orchestrator
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_results: Vec<CrossCheckResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl AgentResponse {
    /// Create a successful response carrying a payload
    pub fn success(source_agent: impl Into<String>, payload: Value) -> Self {
        Self {
            success: true,
            payload,
            source_agent: source_agent.into(),
            timestamp: Utc::now(),
            validation_results: Vec::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Create a failed response carrying an error string
    pub fn failure(source_agent: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            payload: Value::Null,
            source_agent: source_agent.into(),
            timestamp: Utc::now(),
            validation_results: Vec::new(),
            errors: vec![error.into()],
            warnings: Vec::new(),
        }
    }

    /// Attach a warning without affecting the success flag
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// True if any attached cross-check came back invalid
    pub fn has_invalid_checks(&self) -> bool {
        self.validation_results.iter().any(|c| c.is_invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_carries_error_and_null_payload() {
        let resp = AgentResponse::failure("salary_agent", "Unknown action: calculate_x");
        assert!(!resp.success);
        assert_eq!(resp.payload, Value::Null);
        assert_eq!(resp.errors, vec!["Unknown action: calculate_x"]);
    }

    #[test]
    fn test_has_invalid_checks() {
        let mut resp = AgentResponse::success("salary_agent", json!({"amount": 440.0}));
        assert!(!resp.has_invalid_checks());
        resp.validation_results
            .push(CrossCheckResult::invalid("policy_agent", "rate mismatch"));
        assert!(resp.has_invalid_checks());
    }
}
