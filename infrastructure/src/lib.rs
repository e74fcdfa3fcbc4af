//! Infrastructure layer for agentix-hr
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod documents;
pub mod knowledge;
pub mod notify;
pub mod sessions;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileDocumentConfig, FileGeneralConfig,
    FileNotificationConfig, FileSessionConfig,
};
pub use documents::LocalDocumentGenerator;
pub use knowledge::StaticKnowledgeBase;
pub use notify::TracingNotifier;
pub use sessions::InMemorySessionStore;
