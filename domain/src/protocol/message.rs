//! Agent messages
//!
//! An [`AgentMessage`] is built per dispatch by the orchestrator and is
//! immutable after construction. It is never persisted; the session
//! context travels with it as a serialized snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A single message from one agent (or the orchestrator) to another
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentMessage {
    pub source_agent: String,
    pub target_agent: String,
    /// Action key understood by the target agent
    pub action: String,
    /// Opaque action parameters
    pub payload: Value,
    /// Snapshot of the session's shared context, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    pub message_id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// Whether the sender expects this result to be cross-checked
    pub requires_validation: bool,
    /// Agents nominated to perform the cross-check
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_agents: Vec<String>,
}

impl AgentMessage {
    pub fn new(
        source_agent: impl Into<String>,
        target_agent: impl Into<String>,
        action: impl Into<String>,
        payload: Value,
    ) -> Self {
        Self {
            source_agent: source_agent.into(),
            target_agent: target_agent.into(),
            action: action.into(),
            payload,
            context: None,
            message_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            requires_validation: false,
            validation_agents: Vec::new(),
        }
    }

    /// Attach a serialized session context snapshot
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    /// Mark the message as requiring validation by the given agents
    pub fn with_validation(mut self, validation_agents: Vec<String>) -> Self {
        self.requires_validation = true;
        self.validation_agents = validation_agents;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_ids_are_unique() {
        let a = AgentMessage::new("orchestrator", "salary_agent", "calculate_epf", json!({}));
        let b = AgentMessage::new("orchestrator", "salary_agent", "calculate_epf", json!({}));
        assert_ne!(a.message_id, b.message_id);
    }

    #[test]
    fn test_with_validation_sets_flag() {
        let msg = AgentMessage::new("orchestrator", "onboarding_agent", "create_offer", json!({}))
            .with_validation(vec!["policy_agent".to_string()]);
        assert!(msg.requires_validation);
        assert_eq!(msg.validation_agents, vec!["policy_agent"]);
    }

    #[test]
    fn test_context_omitted_from_json_when_absent() {
        let msg = AgentMessage::new("orchestrator", "policy_agent", "get_policy", json!({}));
        let serialized = serde_json::to_value(&msg).unwrap();
        assert!(serialized.get("context").is_none());
    }
}
