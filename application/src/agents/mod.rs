//! The agent abstraction and the five specialist agents.
//!
//! An agent is a unit with a fixed capability set and a closed set of
//! actions. Handlers return `Result<Value, AgentError>`; the
//! [`AgentHandle`] wrapper converts every error into a failure
//! [`AgentResponse`], so a bug in one agent can never crash the
//! dispatch loop or a sibling agent.

pub mod agentix;
pub mod onboarding;
pub(crate) mod payload;
pub mod policy;
pub mod salary;
pub mod training;

pub use agentix::{AGENTIX_AGENT_ID, AgentixAgent};
pub use onboarding::{ONBOARDING_AGENT_ID, OnboardingAgent};
pub use policy::{POLICY_AGENT_ID, PolicyAgent};
pub use salary::{SALARY_AGENT_ID, SalaryAgent};
pub use training::{TRAINING_AGENT_ID, TrainingAgent};

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use agentix_domain::{AgentMessage, AgentResponse, AgentStatus, Capability, CrossCheckResult};

use crate::ports::{DocumentError, KnowledgeError, NotifyError};

/// Errors a handler can return.
///
/// `UnknownAction` is a routing error: the caller asked for something
/// this agent does not do. Everything else is a handler failure and
/// leaves the agent in [`AgentStatus::Error`] until its next call.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Unsupported jurisdiction: {0}")]
    UnsupportedJurisdiction(String),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Knowledge(#[from] KnowledgeError),

    #[error(transparent)]
    Notification(#[from] NotifyError),

    #[error("{0}")]
    Internal(String),
}

/// A specialist handler in the orchestration mesh.
///
/// Implementations parse the action string into their own action enum
/// and match exhaustively, so adding an action without a handler is a
/// compile error rather than a runtime fallback.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Stable registry id, e.g. `"salary_agent"`
    fn id(&self) -> &str;

    fn capabilities(&self) -> &[Capability];

    /// Every action string this agent answers to
    fn actions(&self) -> &[&'static str];

    /// Peer agents that must cross-check this agent's output
    fn cross_check_agents(&self) -> &[&'static str] {
        &[]
    }

    /// Execute one action against a payload and optional context snapshot
    async fn handle(
        &self,
        action: &str,
        payload: &Value,
        context: Option<&Value>,
    ) -> Result<Value, AgentError>;

    /// Judge another agent's output.
    ///
    /// The orchestrator calls this on *peer* agents after a successful
    /// dispatch. The default accepts everything; validators override
    /// it with domain checks.
    fn validate_cross_check(&self, _payload: &Value) -> CrossCheckResult {
        CrossCheckResult::valid(self.id(), "no validation rules declared")
    }
}

/// An agent plus its mutable processing status.
///
/// Status transitions happen only here: Processing on entry, Idle
/// after success or a routing error, Error after a handler failure.
pub struct AgentHandle {
    agent: Arc<dyn Agent>,
    status: Mutex<AgentStatus>,
}

impl AgentHandle {
    pub fn new(agent: Arc<dyn Agent>) -> Self {
        Self {
            agent,
            status: Mutex::new(AgentStatus::Idle),
        }
    }

    pub fn id(&self) -> &str {
        self.agent.id()
    }

    pub fn agent(&self) -> &Arc<dyn Agent> {
        &self.agent
    }

    pub fn status(&self) -> AgentStatus {
        *self
            .status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn set_status(&self, status: AgentStatus) {
        *self
            .status
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = status;
    }

    /// Deliver one message and normalize the outcome.
    ///
    /// Never returns an error and never panics: handler failures come
    /// back as `AgentResponse { success: false, .. }`.
    pub async fn receive_message(&self, message: &AgentMessage) -> AgentResponse {
        self.set_status(AgentStatus::Processing);
        debug!(
            agent = self.agent.id(),
            action = %message.action,
            message_id = %message.message_id,
            "receiving message"
        );

        let outcome = self
            .agent
            .handle(&message.action, &message.payload, message.context.as_ref())
            .await;

        match outcome {
            Ok(payload) => {
                self.set_status(AgentStatus::Idle);
                AgentResponse::success(self.agent.id(), payload)
            }
            Err(err @ AgentError::UnknownAction(_)) => {
                // Routing error, not a handler failure: the agent is
                // healthy and stays available.
                self.set_status(AgentStatus::Idle);
                AgentResponse::failure(self.agent.id(), err.to_string())
            }
            Err(err) => {
                warn!(agent = self.agent.id(), error = %err, "handler failed");
                self.set_status(AgentStatus::Error);
                AgentResponse::failure(self.agent.id(), err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // a minimal agent with one healthy and one failing action
    struct FlakyAgent;

    #[async_trait]
    impl Agent for FlakyAgent {
        fn id(&self) -> &str {
            "flaky_agent"
        }

        fn capabilities(&self) -> &[Capability] {
            &[Capability::EmployeeSupport]
        }

        fn actions(&self) -> &[&'static str] {
            &["ok", "boom"]
        }

        async fn handle(
            &self,
            action: &str,
            _payload: &Value,
            _context: Option<&Value>,
        ) -> Result<Value, AgentError> {
            match action {
                "ok" => Ok(json!({"done": true})),
                "boom" => Err(AgentError::Internal("boom".to_string())),
                other => Err(AgentError::UnknownAction(other.to_string())),
            }
        }
    }

    fn handle() -> AgentHandle {
        AgentHandle::new(Arc::new(FlakyAgent))
    }

    #[tokio::test]
    async fn test_success_returns_to_idle() {
        let handle = handle();
        let msg = AgentMessage::new("orchestrator", "flaky_agent", "ok", json!({}));
        let resp = handle.receive_message(&msg).await;
        assert!(resp.success);
        assert_eq!(handle.status(), AgentStatus::Idle);
    }

    #[tokio::test]
    async fn test_unknown_action_fails_without_error_status() {
        let handle = handle();
        let msg = AgentMessage::new("orchestrator", "flaky_agent", "dance", json!({}));
        let resp = handle.receive_message(&msg).await;
        assert!(!resp.success);
        assert!(resp.errors[0].contains("Unknown action"));
        assert_eq!(handle.status(), AgentStatus::Idle);
    }

    #[tokio::test]
    async fn test_handler_failure_sets_error_status() {
        let handle = handle();
        let msg = AgentMessage::new("orchestrator", "flaky_agent", "boom", json!({}));
        let resp = handle.receive_message(&msg).await;
        assert!(!resp.success);
        assert_eq!(resp.errors, vec!["boom"]);
        assert_eq!(handle.status(), AgentStatus::Error);
    }

    #[tokio::test]
    async fn test_next_call_resets_error_status() {
        let handle = handle();
        let boom = AgentMessage::new("orchestrator", "flaky_agent", "boom", json!({}));
        handle.receive_message(&boom).await;
        assert_eq!(handle.status(), AgentStatus::Error);

        let ok = AgentMessage::new("orchestrator", "flaky_agent", "ok", json!({}));
        let resp = handle.receive_message(&ok).await;
        assert!(resp.success);
        assert_eq!(handle.status(), AgentStatus::Idle);
    }

    #[test]
    fn test_default_cross_check_is_valid() {
        let agent = FlakyAgent;
        let check = agent.validate_cross_check(&json!({"anything": 1}));
        assert!(!check.is_invalid());
    }
}
