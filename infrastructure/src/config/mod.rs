//! Configuration loading and validation

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileDocumentConfig, FileGeneralConfig,
    FileNotificationConfig, FileSessionConfig,
};
pub use loader::ConfigLoader;
