//! Agentix agent: reminders, alerts, and HR escalation.
//!
//! The side-effect arm of every workflow. Other agents decide; this
//! one makes sure a human hears about it.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::{Value, json};

use agentix_domain::Capability;

use super::payload::{optional_str, require_str};
use super::{Agent, AgentError};
use crate::ports::{Alert, AlertSeverity, Notifier, Reminder};

pub const AGENTIX_AGENT_ID: &str = "agentix_agent";

/// Days before a pending offer expires without response
const OFFER_FOLLOW_UP_DAYS: i64 = 3;

/// Days after acceptance to check document signing
const DOCUMENT_FOLLOW_UP_DAYS: i64 = 7;

/// The closed set of agentix actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AgentixAction {
    SetupReminders,
    SendAlert,
    EscalateToHr,
}

impl FromStr for AgentixAction {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "setup_reminders" => Ok(AgentixAction::SetupReminders),
            "send_alert" => Ok(AgentixAction::SendAlert),
            "escalate_to_hr" => Ok(AgentixAction::EscalateToHr),
            other => Err(AgentError::UnknownAction(other.to_string())),
        }
    }
}

/// Raises alerts and schedules follow-up reminders through the
/// notification port.
pub struct AgentixAgent {
    notifier: Arc<dyn Notifier>,
}

impl AgentixAgent {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    async fn setup_reminders(&self, payload: &Value) -> Result<Value, AgentError> {
        let reference = optional_str(payload, "offer_id")
            .or_else(|| optional_str(payload, "employee_id"))
            .unwrap_or("unreferenced")
            .to_string();

        let now = Utc::now();
        let mut reminders = vec![Reminder {
            subject: "Follow up on pending offer".to_string(),
            due: now + Duration::days(OFFER_FOLLOW_UP_DAYS),
            reference: reference.clone(),
        }];

        // accepted offers also get a document-signing check
        if optional_str(payload, "status") == Some("accepted") {
            reminders.push(Reminder {
                subject: "Confirm onboarding documents are signed".to_string(),
                due: now + Duration::days(DOCUMENT_FOLLOW_UP_DAYS),
                reference: reference.clone(),
            });
        }

        self.notifier.schedule_reminders(&reminders).await?;
        Ok(json!({
            "reference": reference,
            "reminders_scheduled": reminders.len(),
        }))
    }

    async fn send_alert(&self, payload: &Value) -> Result<Value, AgentError> {
        let subject = require_str(payload, "subject")?;
        let body = optional_str(payload, "body").unwrap_or("");
        let severity = match optional_str(payload, "severity") {
            Some("high") => AlertSeverity::High,
            _ => AlertSeverity::Normal,
        };

        self.notifier
            .send_alert(&Alert {
                severity,
                subject: subject.to_string(),
                body: body.to_string(),
            })
            .await?;

        Ok(json!({"alert_sent": true, "subject": subject}))
    }

    async fn escalate(&self, payload: &Value) -> Result<Value, AgentError> {
        let reason = require_str(payload, "reason")?;
        self.notifier
            .send_alert(&Alert {
                severity: AlertSeverity::High,
                subject: "Escalation to HR".to_string(),
                body: reason.to_string(),
            })
            .await?;
        Ok(json!({"escalated": true}))
    }
}

#[async_trait]
impl Agent for AgentixAgent {
    fn id(&self) -> &str {
        AGENTIX_AGENT_ID
    }

    fn capabilities(&self) -> &[Capability] {
        &[Capability::EmployeeSupport]
    }

    fn actions(&self) -> &[&'static str] {
        &["setup_reminders", "send_alert", "escalate_to_hr"]
    }

    async fn handle(
        &self,
        action: &str,
        payload: &Value,
        _context: Option<&Value>,
    ) -> Result<Value, AgentError> {
        match AgentixAction::from_str(action)? {
            AgentixAction::SetupReminders => self.setup_reminders(payload).await,
            AgentixAction::SendAlert => self.send_alert(payload).await,
            AgentixAction::EscalateToHr => self.escalate(payload).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::NotifyError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        alerts: Mutex<Vec<Alert>>,
        reminders: Mutex<Vec<Reminder>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send_alert(&self, alert: &Alert) -> Result<(), NotifyError> {
            self.alerts.lock().unwrap().push(alert.clone());
            Ok(())
        }

        async fn schedule_reminders(&self, reminders: &[Reminder]) -> Result<(), NotifyError> {
            self.reminders.lock().unwrap().extend_from_slice(reminders);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_setup_reminders_for_accepted_offer_adds_document_check() {
        let notifier = Arc::new(RecordingNotifier::default());
        let agent = AgentixAgent::new(notifier.clone());
        let result = agent
            .handle(
                "setup_reminders",
                &json!({"offer_id": "OF-1", "status": "accepted"}),
                None,
            )
            .await
            .unwrap();
        assert_eq!(result["reminders_scheduled"], json!(2));
        assert_eq!(notifier.reminders.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_send_alert_high_severity() {
        let notifier = Arc::new(RecordingNotifier::default());
        let agent = AgentixAgent::new(notifier.clone());
        agent
            .handle(
                "send_alert",
                &json!({"subject": "Offer rejected", "severity": "high"}),
                None,
            )
            .await
            .unwrap();
        let alerts = notifier.alerts.lock().unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, AlertSeverity::High);
    }

    #[tokio::test]
    async fn test_escalate_requires_reason() {
        let agent = AgentixAgent::new(Arc::new(RecordingNotifier::default()));
        let err = agent
            .handle("escalate_to_hr", &json!({}), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::MissingField(_)));
    }
}
