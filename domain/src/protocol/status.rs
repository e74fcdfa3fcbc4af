//! Per-agent processing status

use serde::{Deserialize, Serialize};

/// Lifecycle state of an agent instance.
///
/// Mutated only by the message-receiving wrapper: an agent is `Idle`
/// before and after a successful call, `Processing` while a handler
/// runs, and `Error` after a handler failure until the next call
/// resets it to `Processing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Idle,
    Processing,
    /// Reserved for a validation-blocking state (an agent paused until
    /// a peer or human approves its output). No current workflow sets
    /// it; the variant is kept so the surface matches the protocol.
    WaitingValidation,
    Error,
}

impl AgentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AgentStatus::Idle => "idle",
            AgentStatus::Processing => "processing",
            AgentStatus::WaitingValidation => "waiting_validation",
            AgentStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
