//! Notifier adapter that emits through `tracing`

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::{info, warn};

use agentix_application::{Alert, AlertSeverity, Notifier, NotifyError, Reminder};

/// [`Notifier`] that writes alerts and reminders to the log stream.
///
/// The production deployment swaps this for a chat/email adapter; the
/// delivery counters exist so callers can verify fan-out in tests and
/// health checks.
pub struct TracingNotifier {
    enabled: bool,
    alerts_sent: AtomicUsize,
    reminders_scheduled: AtomicUsize,
}

impl TracingNotifier {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            alerts_sent: AtomicUsize::new(0),
            reminders_scheduled: AtomicUsize::new(0),
        }
    }

    pub fn alerts_sent(&self) -> usize {
        self.alerts_sent.load(Ordering::Relaxed)
    }

    pub fn reminders_scheduled(&self) -> usize {
        self.reminders_scheduled.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Notifier for TracingNotifier {
    async fn send_alert(&self, alert: &Alert) -> Result<(), NotifyError> {
        if !self.enabled {
            return Ok(());
        }
        match alert.severity {
            AlertSeverity::High => warn!(
                subject = alert.subject.as_str(),
                body = alert.body.as_str(),
                "HR alert"
            ),
            AlertSeverity::Normal => info!(
                subject = alert.subject.as_str(),
                body = alert.body.as_str(),
                "HR alert"
            ),
        }
        self.alerts_sent.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn schedule_reminders(&self, reminders: &[Reminder]) -> Result<(), NotifyError> {
        if !self.enabled {
            return Ok(());
        }
        for reminder in reminders {
            info!(
                subject = reminder.subject.as_str(),
                due = %reminder.due,
                reference = reminder.reference.as_str(),
                "reminder scheduled"
            );
        }
        self.reminders_scheduled
            .fetch_add(reminders.len(), Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_counts_deliveries() {
        let notifier = TracingNotifier::new(true);
        notifier
            .send_alert(&Alert {
                severity: AlertSeverity::Normal,
                subject: "hello".to_string(),
                body: "world".to_string(),
            })
            .await
            .unwrap();
        notifier
            .schedule_reminders(&[Reminder {
                subject: "follow up".to_string(),
                due: Utc::now(),
                reference: "OF-1".to_string(),
            }])
            .await
            .unwrap();

        assert_eq!(notifier.alerts_sent(), 1);
        assert_eq!(notifier.reminders_scheduled(), 1);
    }

    #[tokio::test]
    async fn test_disabled_notifier_drops_silently() {
        let notifier = TracingNotifier::new(false);
        notifier
            .send_alert(&Alert {
                severity: AlertSeverity::High,
                subject: "ignored".to_string(),
                body: String::new(),
            })
            .await
            .unwrap();
        assert_eq!(notifier.alerts_sent(), 0);
    }
}
