//! Agent message-passing protocol
//!
//! The uniform contract every agent honors: a message in, a response
//! out, with cross-check verdicts and per-agent status on the side.

pub mod cross_check;
pub mod message;
pub mod response;
pub mod status;

pub use cross_check::{CrossCheckResult, ValidationResult};
pub use message::AgentMessage;
pub use response::AgentResponse;
pub use status::AgentStatus;
