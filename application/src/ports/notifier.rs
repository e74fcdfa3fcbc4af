//! Notification port
//!
//! Alerts and reminder schedules raised by the agentix agent. The
//! production adapter fans out to chat/email channels; the bundled
//! adapter logs through `tracing`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while delivering a notification
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

/// How urgently an alert should be surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Normal,
    High,
}

/// A one-shot alert to the HR team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub subject: String,
    pub body: String,
}

/// A scheduled follow-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub subject: String,
    pub due: DateTime<Utc>,
    /// Who the reminder concerns (employee id or offer id)
    pub reference: String,
}

/// Port for raising alerts and scheduling reminders
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_alert(&self, alert: &Alert) -> Result<(), NotifyError>;

    async fn schedule_reminders(&self, reminders: &[Reminder]) -> Result<(), NotifyError>;
}
