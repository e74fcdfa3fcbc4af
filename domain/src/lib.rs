//! Domain layer for agentix-hr
//!
//! This crate contains the core business logic: intent classification,
//! the agent message-passing protocol, per-session shared context, and
//! the statutory contribution tables for Malaysia and Singapore. It
//! has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Routing
//!
//! Free-text queries are classified onto a [`Capability`] by a pure,
//! deterministic rule pipeline; jurisdiction detection picks between
//! the Malaysian and Singaporean statutory schedules.
//!
//! ## Protocol
//!
//! Agents exchange [`AgentMessage`]s and answer with
//! [`AgentResponse`]s. A peer agent can judge another agent's output,
//! producing a [`CrossCheckResult`] that workflows consult before
//! committing a result.

pub mod context;
pub mod core;
pub mod protocol;
pub mod routing;
pub mod statutory;
pub mod workflow;

// Re-export commonly used types
pub use context::{AuditEntry, SharedContext};
pub use core::error::DomainError;
pub use protocol::{
    AgentMessage, AgentResponse, AgentStatus, CrossCheckResult, ValidationResult,
};
pub use routing::{
    Capability, Classification, IntentClassifier, Jurisdiction, detect_jurisdiction,
};
pub use statutory::StatutoryBreakdown;
pub use workflow::{WorkflowResult, WorkflowType};
