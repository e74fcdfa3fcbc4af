//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown agent: {0}")]
    UnknownAgent(String),

    #[error("Unknown action: {action} (agent {agent})")]
    UnknownAction { agent: String, action: String },

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Unsupported jurisdiction: {0}")]
    UnsupportedJurisdiction(String),
}

impl DomainError {
    /// Check if this error is a routing error (unknown agent or action)
    pub fn is_routing_error(&self) -> bool {
        matches!(
            self,
            DomainError::UnknownAgent(_) | DomainError::UnknownAction { .. }
        )
    }
}
