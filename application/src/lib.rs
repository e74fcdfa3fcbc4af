//! Application layer for agentix-hr
//!
//! This crate contains the specialist agents, the orchestrator that
//! coordinates them, and the port definitions their collaborators
//! implement. It depends only on the domain layer.

pub mod agents;
pub mod orchestrator;
pub mod ports;

// Re-export commonly used types
pub use agents::{
    AGENTIX_AGENT_ID, Agent, AgentError, AgentHandle, AgentixAgent, ONBOARDING_AGENT_ID,
    OnboardingAgent, POLICY_AGENT_ID, PolicyAgent, SALARY_AGENT_ID, SalaryAgent,
    TRAINING_AGENT_ID, TrainingAgent,
};
pub use orchestrator::{AgentInfo, MultiAgentOrchestrator, ORCHESTRATOR_ID, WorkflowLogEntry};
pub use ports::{
    Alert, AlertSeverity, Citation, DocumentError, DocumentGenerator, DocumentRequest,
    GeneratedDocument, KnowledgeAnswer, KnowledgeBase, KnowledgeError, NotifyError, Notifier,
    Reminder, SessionStore,
};
