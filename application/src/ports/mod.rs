//! Ports: interfaces the application layer needs from the outside world.
//!
//! Adapters implementing these live in the infrastructure layer.

pub mod document_generator;
pub mod knowledge_base;
pub mod notifier;
pub mod session_store;

pub use document_generator::{DocumentError, DocumentGenerator, DocumentRequest, GeneratedDocument};
pub use knowledge_base::{Citation, KnowledgeAnswer, KnowledgeBase, KnowledgeError};
pub use notifier::{Alert, AlertSeverity, Notifier, NotifyError, Reminder};
pub use session_store::SessionStore;
