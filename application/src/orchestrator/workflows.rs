//! The named workflows the orchestrator composes.
//!
//! Each workflow is a sequence of dispatches whose outcomes fold into
//! one [`WorkflowResult`]. Cross-check verdicts have a per-workflow
//! severity policy: fatal for calculations, advisory for offers and
//! acceptances. Side-effect steps (reminders, alerts) run even when an
//! earlier verdict was unfavorable; at-least-once, not all-or-nothing.

use serde_json::{Value, json};
use tracing::warn;

use agentix_domain::{
    AgentResponse, Jurisdiction, ValidationResult, WorkflowResult, WorkflowType,
};

use super::MultiAgentOrchestrator;

/// Keyword routes for `process_query`.
///
/// Deliberately a lighter router than the domain's `IntentClassifier`:
/// this path serves short, already-in-session queries and routes on
/// the first matching keyword only. Fallback is the policy agent's
/// knowledge-base query.
const QUERY_ROUTES: &[(&str, &str, &str)] = &[
    ("train", "training_agent", "get_training_catalog"),
    ("offer", "onboarding_agent", "get_offer_status"),
    ("salary", "salary_agent", "calculate_salary_package"),
    ("pay", "salary_agent", "calculate_salary_package"),
];

const QUERY_FALLBACK: (&str, &str) = ("policy_agent", "hr_query");

impl MultiAgentOrchestrator {
    /// Create an offer, cross-check it, and schedule follow-ups.
    ///
    /// An invalid cross-check degrades the reported success flag but
    /// does not stop the reminder side effect: the offer exists either
    /// way and HR must follow up on it.
    pub async fn process_onboarding_offer(
        &self,
        employee_data: Value,
        offer_details: Value,
        session_id: Option<&str>,
    ) -> WorkflowResult {
        let mut result = WorkflowResult::new(WorkflowType::Onboarding);
        result.involve_agent("onboarding_agent");

        let payload = json!({
            "employee_data": employee_data,
            "offer_details": offer_details,
        });
        let response = self
            .dispatch_with_cross_check("onboarding_agent", "create_offer", payload, session_id)
            .await;

        if !response.success {
            result.errors.extend(response.errors);
            result.finalize();
            self.log_workflow(&result);
            return result;
        }

        result.data = json!({"offer": response.payload});
        self.fold_cross_checks(&mut result, &response);

        let reminders = self
            .dispatch(
                "agentix_agent",
                "setup_reminders",
                response.payload.clone(),
                session_id,
            )
            .await;
        result.involve_agent("agentix_agent");
        if reminders.success {
            result.data["reminders"] = reminders.payload;
        } else {
            result.errors.extend(reminders.errors);
        }

        result.finalize();
        self.log_workflow(&result);
        result
    }

    /// Accept an offer and run the full onboarding fan-out.
    ///
    /// Documents, training, and reminders are triggered unconditionally
    /// once the acceptance itself succeeds; an unfavorable cross-check
    /// only appends an error string.
    pub async fn process_offer_acceptance(
        &self,
        offer_id: &str,
        employee_id: &str,
        signature: Option<&str>,
        session_id: Option<&str>,
    ) -> WorkflowResult {
        let mut result = WorkflowResult::new(WorkflowType::OfferAcceptance);
        result.involve_agent("onboarding_agent");

        let mut payload = json!({"offer_id": offer_id, "employee_id": employee_id});
        if let Some(sig) = signature {
            payload["signature"] = json!(sig);
        }

        let response = self
            .dispatch_with_cross_check("onboarding_agent", "accept_offer", payload, session_id)
            .await;

        if !response.success {
            result.errors.extend(response.errors);
            result.finalize();
            self.log_workflow(&result);
            return result;
        }

        result.data = json!({"acceptance": response.payload});
        self.fold_cross_checks(&mut result, &response);

        // 1. onboarding documents
        let documents = self
            .dispatch(
                "onboarding_agent",
                "generate_onboarding_documents",
                json!({"offer_id": offer_id}),
                session_id,
            )
            .await;
        if documents.success {
            result.data["documents"] = documents.payload;
        } else {
            result.errors.extend(documents.errors);
        }

        // 2. mandatory training
        let training = self
            .dispatch(
                "training_agent",
                "get_onboarding_training",
                json!({
                    "jurisdiction": response.payload.get("jurisdiction").cloned().unwrap_or(Value::Null),
                    "position": response.payload.get("position").cloned().unwrap_or(Value::Null),
                }),
                session_id,
            )
            .await;
        result.involve_agent("training_agent");
        if training.success {
            result.data["training"] = training.payload;
        } else {
            result.errors.extend(training.errors);
        }

        // 3. follow-up reminders
        let reminders = self
            .dispatch(
                "agentix_agent",
                "setup_reminders",
                response.payload.clone(),
                session_id,
            )
            .await;
        result.involve_agent("agentix_agent");
        if reminders.success {
            result.data["reminders"] = reminders.payload;
        } else {
            result.errors.extend(reminders.errors);
        }

        result.finalize();
        self.log_workflow(&result);
        result
    }

    /// Reject an offer and alert HR.
    ///
    /// No cross-check here: a rejection destroys nothing worth
    /// validating. The alert goes out exactly once whether or not the
    /// rejection call itself succeeded; HR wants to hear about failed
    /// rejections too.
    pub async fn process_offer_rejection(
        &self,
        offer_id: &str,
        employee_id: &str,
        reason: Option<&str>,
        session_id: Option<&str>,
    ) -> WorkflowResult {
        let mut result = WorkflowResult::new(WorkflowType::OfferRejection);
        result.involve_agent("onboarding_agent");

        let mut payload = json!({"offer_id": offer_id, "employee_id": employee_id});
        if let Some(reason) = reason {
            payload["reason"] = json!(reason);
        }

        let response = self
            .dispatch("onboarding_agent", "reject_offer", payload, session_id)
            .await;
        if response.success {
            result.data = json!({"rejection": response.payload});
        } else {
            result.errors.extend(response.errors);
        }

        let alert = self
            .dispatch(
                "agentix_agent",
                "send_alert",
                json!({
                    "subject": format!("Offer {offer_id} rejected"),
                    "body": reason.unwrap_or("no reason given"),
                    "severity": "high",
                }),
                session_id,
            )
            .await;
        result.involve_agent("agentix_agent");
        if !alert.success {
            result.errors.extend(alert.errors);
        }

        result.finalize();
        self.log_workflow(&result);
        result
    }

    /// Run one statutory calculation with mandatory policy review.
    ///
    /// Here an invalid cross-check is fatal: the calculation's numbers
    /// are the entire product, so a policy violation fails the
    /// workflow and the validator's corrections ride along in the data.
    pub async fn process_calculation(
        &self,
        calculation_type: &str,
        params: Value,
        session_id: Option<&str>,
    ) -> WorkflowResult {
        let mut result = WorkflowResult::new(WorkflowType::Calculation);
        result.involve_agent("salary_agent");

        let action = format!("calculate_{calculation_type}");
        let response = self
            .dispatch_with_cross_check("salary_agent", &action, params, session_id)
            .await;

        if !response.success {
            result.errors.extend(response.errors);
            result.finalize();
            self.log_workflow(&result);
            return result;
        }

        result.data = response.payload.clone();
        for check in &response.validation_results {
            result.involve_agent(&check.validator_agent);
            match check.result {
                ValidationResult::Invalid => {
                    result.push_error(format!("Policy violation: {}", check.notes));
                    if !check.corrections.is_empty() {
                        result.data["corrections"] =
                            Value::Object(check.corrections.clone());
                    }
                }
                ValidationResult::NeedsReview | ValidationResult::Pending => {
                    result.push_warning(format!(
                        "{}: {}",
                        check.validator_agent, check.notes
                    ));
                }
                ValidationResult::Valid => {}
            }
        }
        result.cross_checks = response.validation_results;

        result.finalize();
        self.log_workflow(&result);
        result
    }

    /// Route a free-text query to one agent and return its answer.
    pub async fn process_query(
        &self,
        query: &str,
        session_id: Option<&str>,
        jurisdiction: Option<Jurisdiction>,
    ) -> WorkflowResult {
        let mut result = WorkflowResult::new(WorkflowType::Query);

        let lower = query.to_lowercase();
        let (target, action) = QUERY_ROUTES
            .iter()
            .find(|(keyword, _, _)| lower.contains(keyword))
            .map(|(_, target, action)| (*target, *action))
            .unwrap_or(QUERY_FALLBACK);

        let mut payload = json!({"query": query});
        if let Some(j) = jurisdiction {
            payload["jurisdiction"] = json!(j.as_str());
        }
        // best-effort parameter extraction for routes that need more
        // than free text
        if action == "calculate_salary_package" {
            if let Some(amount) = first_number(query) {
                payload["salary"] = json!(amount);
            }
        }
        if action == "get_offer_status" {
            if let Some(offer_id) = first_offer_id(query) {
                payload["offer_id"] = json!(offer_id);
            }
        }

        let response = self.dispatch(target, action, payload, session_id).await;
        result.involve_agent(target);
        if response.success {
            result.data = json!({
                "routed_to": target,
                "action": action,
                "response": response.payload,
            });
        } else {
            result.errors.extend(response.errors);
        }

        result.finalize();
        self.log_workflow(&result);
        result
    }

    /// Record advisory cross-check verdicts: an invalid check appends
    /// an error (degrading the success flag) but never stops the
    /// workflow's later steps.
    fn fold_cross_checks(&self, result: &mut WorkflowResult, response: &AgentResponse) {
        for check in &response.validation_results {
            result.involve_agent(&check.validator_agent);
            match check.result {
                ValidationResult::Invalid => {
                    warn!(
                        validator = check.validator_agent.as_str(),
                        notes = check.notes.as_str(),
                        "cross-check invalid"
                    );
                    result.push_error(format!(
                        "Cross-check failed ({}): {}",
                        check.validator_agent, check.notes
                    ));
                }
                ValidationResult::NeedsReview | ValidationResult::Pending => {
                    result.push_warning(format!(
                        "{}: {}",
                        check.validator_agent, check.notes
                    ));
                }
                ValidationResult::Valid => {}
            }
        }
        result.cross_checks = response.validation_results.clone();
    }
}

/// First numeric token in a query, for the salary-package route
fn first_number(query: &str) -> Option<f64> {
    query
        .split(|c: char| !(c.is_ascii_digit() || c == '.'))
        .filter(|t| !t.is_empty())
        .find_map(|t| t.parse::<f64>().ok())
}

/// First token shaped like an offer id (`OF-...`)
fn first_offer_id(query: &str) -> Option<&str> {
    query
        .split_whitespace()
        .find(|t| t.starts_with("OF-"))
        .map(|t| t.trim_end_matches(|c: char| !c.is_alphanumeric()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_number() {
        assert_eq!(first_number("package for 4000 ringgit"), Some(4000.0));
        assert_eq!(first_number("no numbers here"), None);
    }

    #[test]
    fn test_first_offer_id_strips_punctuation() {
        assert_eq!(first_offer_id("status of OF-ab12cd34?"), Some("OF-ab12cd34"));
        assert_eq!(first_offer_id("status of my offer"), None);
    }
}
