//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use agentix_domain::Jurisdiction;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("sessions.ttl_seconds cannot be 0")]
    InvalidSessionTtl,

    #[error("sessions.max_sessions cannot be 0")]
    InvalidMaxSessions,

    #[error("unknown jurisdiction: {0}")]
    UnknownJurisdiction(String),

    #[error("documents.output_dir cannot be empty")]
    EmptyOutputDir,
}

/// Raw general configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeneralConfig {
    /// Jurisdiction assumed when a request carries none ("MY" or "SG")
    pub default_jurisdiction: String,
    /// Company name stamped into generated documents
    pub company_name: String,
}

impl Default for FileGeneralConfig {
    fn default() -> Self {
        Self {
            default_jurisdiction: "MY".to_string(),
            company_name: "Agentix Sdn Bhd".to_string(),
        }
    }
}

impl FileGeneralConfig {
    /// Parse the default jurisdiction string into the domain type
    pub fn parse_jurisdiction(&self) -> Result<Jurisdiction, ConfigValidationError> {
        self.default_jurisdiction
            .parse()
            .map_err(|_| ConfigValidationError::UnknownJurisdiction(self.default_jurisdiction.clone()))
    }
}

/// Raw session store configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// Idle time after which a session is evicted
    pub ttl_seconds: u64,
    /// Hard cap on concurrently live sessions
    pub max_sessions: usize,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 1800,
            max_sessions: 256,
        }
    }
}

/// Raw document generation configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDocumentConfig {
    /// Directory generated documents are written under
    pub output_dir: String,
}

impl Default for FileDocumentConfig {
    fn default() -> Self {
        Self {
            output_dir: "./documents".to_string(),
        }
    }
}

/// Raw notification configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNotificationConfig {
    /// When false, alerts and reminders are dropped silently
    pub enabled: bool,
}

impl Default for FileNotificationConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Complete raw configuration from TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub general: FileGeneralConfig,
    pub sessions: FileSessionConfig,
    pub documents: FileDocumentConfig,
    pub notifications: FileNotificationConfig,
}

impl FileConfig {
    /// Validate the configuration after merging all sources
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.sessions.ttl_seconds == 0 {
            return Err(ConfigValidationError::InvalidSessionTtl);
        }
        if self.sessions.max_sessions == 0 {
            return Err(ConfigValidationError::InvalidMaxSessions);
        }
        if self.documents.output_dir.trim().is_empty() {
            return Err(ConfigValidationError::EmptyOutputDir);
        }
        self.general.parse_jurisdiction()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.general.parse_jurisdiction().unwrap(), Jurisdiction::My);
        assert_eq!(config.sessions.ttl_seconds, 1800);
    }

    #[test]
    fn test_zero_ttl_is_rejected() {
        let mut config = FileConfig::default();
        config.sessions.ttl_seconds = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidSessionTtl)
        ));
    }

    #[test]
    fn test_unknown_jurisdiction_is_rejected() {
        let mut config = FileConfig::default();
        config.general.default_jurisdiction = "US".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::UnknownJurisdiction(_))
        ));
    }

    #[test]
    fn test_deserializes_partial_toml() {
        let config: FileConfig = toml::from_str(
            r#"
            [general]
            default_jurisdiction = "SG"
            "#,
        )
        .unwrap();
        assert_eq!(config.general.default_jurisdiction, "SG");
        // untouched sections keep their defaults
        assert_eq!(config.sessions.max_sessions, 256);
    }
}
