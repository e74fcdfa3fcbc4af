//! The multi-agent orchestrator
//!
//! Owns the agent registry and the session store, performs routed
//! dispatch with optional cross-checking, and composes the named
//! workflows (offer creation, acceptance, rejection, calculation,
//! query routing).
//!
//! Failure semantics: nothing here retries and nothing here returns
//! `Err`. A failed dispatch aborts only the calling workflow step;
//! later steps still run, and every failure lands in the result's
//! `errors` list. Callers must read `errors`, not just `success`.

mod workflows;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use agentix_domain::{
    AgentMessage, AgentResponse, AgentStatus, Capability, WorkflowResult,
};

use crate::agents::{
    Agent, AgentHandle, AgentixAgent, OnboardingAgent, PolicyAgent, SalaryAgent, TrainingAgent,
};
use crate::ports::{DocumentGenerator, KnowledgeBase, Notifier, SessionStore};

/// Source id stamped on every orchestrator-built message
pub const ORCHESTRATOR_ID: &str = "orchestrator";

/// Introspection record for one registered agent
#[derive(Debug, Clone, Serialize)]
pub struct AgentInfo {
    pub id: String,
    pub capabilities: Vec<Capability>,
    pub actions: Vec<String>,
    pub status: AgentStatus,
    pub cross_check_agents: Vec<String>,
}

/// One entry in the in-memory workflow audit trail
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowLogEntry {
    pub timestamp: DateTime<Utc>,
    pub workflow_type: String,
    pub success: bool,
    pub agents_involved: Vec<String>,
    pub error_count: usize,
}

/// Central coordinator for the five specialist agents.
///
/// The registry is fixed at construction and read-only afterwards; the
/// session store is the only shared mutable state and is guarded by
/// its implementation.
pub struct MultiAgentOrchestrator {
    agents: HashMap<String, AgentHandle>,
    sessions: Arc<dyn SessionStore>,
    log: Mutex<Vec<WorkflowLogEntry>>,
}

impl MultiAgentOrchestrator {
    /// Build the orchestrator with its five agents, injecting the
    /// external collaborators each agent needs.
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        documents: Arc<dyn DocumentGenerator>,
        knowledge: Arc<dyn KnowledgeBase>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let roster: Vec<Arc<dyn Agent>> = vec![
            Arc::new(PolicyAgent::new(knowledge)),
            Arc::new(SalaryAgent::new()),
            Arc::new(TrainingAgent::new()),
            Arc::new(OnboardingAgent::new(documents)),
            Arc::new(AgentixAgent::new(notifier)),
        ];

        let mut agents = HashMap::new();
        for agent in roster {
            agents.insert(agent.id().to_string(), AgentHandle::new(agent));
        }

        Self {
            agents,
            sessions,
            log: Mutex::new(Vec::new()),
        }
    }

    /// Dispatch one action to one agent.
    ///
    /// An unknown target is a failure response, never a panic or an
    /// `Err`; routing errors travel the same path as everything else.
    pub async fn dispatch(
        &self,
        target: &str,
        action: &str,
        payload: Value,
        session_id: Option<&str>,
    ) -> AgentResponse {
        self.send(target, action, payload, session_id, Vec::new()).await
    }

    /// Dispatch, then have the target's declared peers judge the result.
    ///
    /// Cross-checking is skipped entirely when the primary call fails:
    /// there is nothing trustworthy to validate.
    pub async fn dispatch_with_cross_check(
        &self,
        target: &str,
        action: &str,
        payload: Value,
        session_id: Option<&str>,
    ) -> AgentResponse {
        let validators: Vec<String> = self
            .agents
            .get(target)
            .map(|h| {
                h.agent()
                    .cross_check_agents()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default();

        let mut response = self
            .send(target, action, payload, session_id, validators.clone())
            .await;
        if !response.success {
            return response;
        }

        for validator_id in &validators {
            let Some(validator) = self.agents.get(validator_id) else {
                response
                    .warnings
                    .push(format!("validator not registered: {validator_id}"));
                continue;
            };
            let check = validator.agent().validate_cross_check(&response.payload);
            debug!(
                validator = validator_id.as_str(),
                verdict = ?check.result,
                "cross-check complete"
            );
            if let Some(sid) = session_id {
                let recorded = check.clone();
                self.sessions
                    .with_session(sid, &mut |ctx| ctx.add_cross_check(recorded.clone()));
            }
            response.validation_results.push(check);
        }

        response
    }

    async fn send(
        &self,
        target: &str,
        action: &str,
        payload: Value,
        session_id: Option<&str>,
        validators: Vec<String>,
    ) -> AgentResponse {
        let Some(handle) = self.agents.get(target) else {
            return AgentResponse::failure(ORCHESTRATOR_ID, format!("Unknown agent: {target}"));
        };

        let mut message = AgentMessage::new(ORCHESTRATOR_ID, target, action, payload);
        if !validators.is_empty() {
            message = message.with_validation(validators);
        }
        if let Some(sid) = session_id {
            let mut snapshot = Value::Null;
            self.sessions
                .with_session(sid, &mut |ctx| snapshot = ctx.snapshot());
            message = message.with_context(snapshot);
        }

        handle.receive_message(&message).await
    }

    /// Introspect one agent
    pub fn agent_info(&self, agent_id: &str) -> Option<AgentInfo> {
        self.agents.get(agent_id).map(|handle| AgentInfo {
            id: handle.id().to_string(),
            capabilities: handle.agent().capabilities().to_vec(),
            actions: handle
                .agent()
                .actions()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            status: handle.status(),
            cross_check_agents: handle
                .agent()
                .cross_check_agents()
                .iter()
                .map(|s| s.to_string())
                .collect(),
        })
    }

    /// Introspect every registered agent, sorted by id
    pub fn all_agents_info(&self) -> Vec<AgentInfo> {
        let mut infos: Vec<AgentInfo> = self
            .agents
            .keys()
            .filter_map(|id| self.agent_info(id))
            .collect();
        infos.sort_by(|a, b| a.id.cmp(&b.id));
        infos
    }

    /// Snapshot of the in-memory workflow audit trail
    pub fn workflow_log(&self) -> Vec<WorkflowLogEntry> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    fn log_workflow(&self, result: &WorkflowResult) {
        info!(
            workflow = result.workflow_type.as_str(),
            success = result.success,
            errors = result.errors.len(),
            "workflow complete"
        );
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(WorkflowLogEntry {
                timestamp: Utc::now(),
                workflow_type: result.workflow_type.to_string(),
                success: result.success,
                agents_involved: result.agents_involved.clone(),
                error_count: result.errors.len(),
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use async_trait::async_trait;
    use serde_json::json;

    use agentix_domain::{SharedContext, ValidationResult};
    use crate::ports::{
        Alert, AlertSeverity, DocumentError, DocumentRequest, GeneratedDocument, KnowledgeAnswer,
        KnowledgeError, NotifyError, Reminder,
    };

    // ==================== test doubles ====================

    struct StubDocs;

    #[async_trait]
    impl DocumentGenerator for StubDocs {
        async fn generate(
            &self,
            request: &DocumentRequest,
        ) -> Result<GeneratedDocument, DocumentError> {
            Ok(GeneratedDocument {
                document_id: format!("DOC-{}", request.document_type),
                storage_path: format!("/tmp/{}.txt", request.document_type),
            })
        }
    }

    struct EchoKb;

    #[async_trait]
    impl KnowledgeBase for EchoKb {
        async fn query(
            &self,
            prompt: &str,
            _jurisdiction: Option<agentix_domain::Jurisdiction>,
        ) -> Result<KnowledgeAnswer, KnowledgeError> {
            Ok(KnowledgeAnswer {
                answer: format!("echo: {prompt}"),
                citations: vec![],
            })
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        alerts: Mutex<Vec<Alert>>,
        reminders: Mutex<Vec<Reminder>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send_alert(&self, alert: &Alert) -> Result<(), NotifyError> {
            self.alerts
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(alert.clone());
            Ok(())
        }

        async fn schedule_reminders(&self, reminders: &[Reminder]) -> Result<(), NotifyError> {
            self.reminders
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend(reminders.iter().cloned());
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemStore {
        sessions: Mutex<HashMap<String, SharedContext>>,
    }

    impl SessionStore for MemStore {
        fn with_session(&self, session_id: &str, f: &mut dyn FnMut(&mut SharedContext)) {
            let mut sessions = self
                .sessions
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let ctx = sessions.entry(session_id.to_string()).or_default();
            f(ctx);
        }

        fn snapshot(&self, session_id: &str) -> Option<Value> {
            self.sessions
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get(session_id)
                .map(SharedContext::snapshot)
        }

        fn clear(&self, session_id: &str) {
            self.sessions
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(session_id);
        }

        fn active_sessions(&self) -> Vec<String> {
            self.sessions
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .keys()
                .cloned()
                .collect()
        }
    }

    fn orchestrator() -> (
        MultiAgentOrchestrator,
        Arc<RecordingNotifier>,
        Arc<MemStore>,
    ) {
        let notifier = Arc::new(RecordingNotifier::default());
        let sessions = Arc::new(MemStore::default());
        let orchestrator = MultiAgentOrchestrator::new(
            sessions.clone(),
            Arc::new(StubDocs),
            Arc::new(EchoKb),
            notifier.clone(),
        );
        (orchestrator, notifier, sessions)
    }

    fn offer_request() -> (Value, Value) {
        (
            json!({"name": "Aisha Rahman"}),
            json!({
                "position": "Software Engineer",
                "salary": 4000.0,
                "jurisdiction": "MY",
            }),
        )
    }

    // ==================== dispatch ====================

    #[tokio::test]
    async fn test_dispatch_to_unknown_agent_is_a_failure_response() {
        let (orch, _, _) = orchestrator();
        let response = orch
            .dispatch("ghost_agent", "do_things", json!({}), None)
            .await;
        assert!(!response.success);
        assert!(response.errors[0].contains("Unknown agent: ghost_agent"));
    }

    #[tokio::test]
    async fn test_all_agents_info_lists_five_agents_sorted() {
        let (orch, _, _) = orchestrator();
        let infos = orch.all_agents_info();
        assert_eq!(infos.len(), 5);
        let ids: Vec<&str> = infos.iter().map(|i| i.id.as_str()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    // ==================== onboarding offer ====================

    #[tokio::test]
    async fn test_onboarding_offer_creates_and_schedules_reminders() {
        let (orch, notifier, _) = orchestrator();
        let (employee, details) = offer_request();
        let result = orch
            .process_onboarding_offer(employee, details, None)
            .await;

        assert!(result.success, "errors: {:?}", result.errors);
        assert!(
            result.data["offer"]["offer_id"]
                .as_str()
                .unwrap()
                .starts_with("OF-")
        );
        for agent in ["onboarding_agent", "policy_agent", "salary_agent", "agentix_agent"] {
            assert!(result.agents_involved.iter().any(|a| a == agent), "{agent}");
        }
        assert!(
            !notifier
                .reminders
                .lock()
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_onboarding_offer_below_minimum_wage_fails_cross_check() {
        let (orch, notifier, _) = orchestrator();
        let (employee, _) = offer_request();
        let details = json!({
            "position": "Intern",
            "salary": 1000.0,
            "jurisdiction": "MY",
        });
        let result = orch
            .process_onboarding_offer(employee, details, None)
            .await;

        assert!(!result.success);
        assert!(result.errors.iter().any(|e| e.contains("Cross-check failed")));
        // side effects still run on a flagged offer
        assert!(!notifier.reminders.lock().unwrap().is_empty());
    }

    // ==================== acceptance ====================

    #[tokio::test]
    async fn test_offer_acceptance_fans_out_to_training_and_reminders() {
        let (orch, _, _) = orchestrator();
        let (employee, details) = offer_request();
        let created = orch
            .process_onboarding_offer(employee, details, None)
            .await;
        let offer_id = created.data["offer"]["offer_id"].as_str().unwrap().to_string();
        let employee_id = created.data["offer"]["employee_id"]
            .as_str()
            .unwrap()
            .to_string();

        let result = orch
            .process_offer_acceptance(&offer_id, &employee_id, Some("A. Rahman"), None)
            .await;

        assert!(result.success, "errors: {:?}", result.errors);
        assert_eq!(result.data["acceptance"]["status"], json!("accepted"));
        assert!(result.data["documents"].is_object());
        assert!(result.data["training"].is_object());
        assert!(result.data["reminders"].is_object());
        for agent in ["training_agent", "agentix_agent"] {
            assert!(result.agents_involved.iter().any(|a| a == agent), "{agent}");
        }
    }

    #[tokio::test]
    async fn test_acceptance_fan_out_survives_invalid_cross_check() {
        let (orch, notifier, _) = orchestrator();
        let (employee, _) = offer_request();
        let details = json!({
            "position": "Intern",
            "salary": 1000.0,
            "jurisdiction": "MY",
        });
        let created = orch
            .process_onboarding_offer(employee, details, None)
            .await;
        let offer_id = created.data["offer"]["offer_id"].as_str().unwrap().to_string();
        let employee_id = created.data["offer"]["employee_id"]
            .as_str()
            .unwrap()
            .to_string();

        let result = orch
            .process_offer_acceptance(&offer_id, &employee_id, None, None)
            .await;

        // the flagged acceptance degrades the result but never stops
        // the onboarding side effects
        assert!(!result.success);
        assert!(result.errors.iter().any(|e| e.contains("Cross-check failed")));
        assert_eq!(result.data["acceptance"]["status"], json!("accepted"));
        assert!(result.data["documents"].is_object());
        assert!(result.data["training"].is_object());
        assert!(result.data["reminders"].is_object());
        for agent in ["training_agent", "agentix_agent"] {
            assert!(result.agents_involved.iter().any(|a| a == agent), "{agent}");
        }
        assert!(!notifier.reminders.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_acceptance_of_unknown_offer_short_circuits() {
        let (orch, _, _) = orchestrator();
        let result = orch
            .process_offer_acceptance("OF-missing", "E-1", None, None)
            .await;
        assert!(!result.success);
        assert!(result.data.get("documents").is_none());
    }

    // ==================== rejection ====================

    #[tokio::test]
    async fn test_rejection_sends_exactly_one_alert_even_when_reject_fails() {
        let (orch, notifier, _) = orchestrator();
        let result = orch
            .process_offer_rejection("OF-missing", "E-1", Some("took another job"), None)
            .await;

        assert!(!result.success);
        let alerts = notifier.alerts.lock().unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, AlertSeverity::High);
        assert!(alerts[0].subject.contains("OF-missing"));
    }

    // ==================== calculation ====================

    #[tokio::test]
    async fn test_calculation_passes_policy_cross_check() {
        let (orch, _, _) = orchestrator();
        let result = orch
            .process_calculation("epf", json!({"salary": 4000.0, "jurisdiction": "MY"}), None)
            .await;

        assert!(result.success, "errors: {:?}", result.errors);
        assert_eq!(
            result.data["values"]["employee_contribution"],
            json!(440.0)
        );
        assert_eq!(result.cross_checks.len(), 1);
        assert_eq!(result.cross_checks[0].validator_agent, "policy_agent");
        assert_eq!(result.cross_checks[0].result, ValidationResult::Valid);
    }

    #[tokio::test]
    async fn test_calculation_with_unknown_type_fails() {
        let (orch, _, _) = orchestrator();
        let result = orch
            .process_calculation("pension", json!({"salary": 4000.0}), None)
            .await;
        assert!(!result.success);
    }

    #[tokio::test]
    async fn test_calculation_records_cross_check_in_session() {
        let (orch, _, sessions) = orchestrator();
        let result = orch
            .process_calculation(
                "epf",
                json!({"salary": 4000.0, "jurisdiction": "MY"}),
                Some("session-1"),
            )
            .await;
        assert!(result.success);

        let snapshot = sessions.snapshot("session-1").unwrap();
        assert_eq!(snapshot["cross_checks"].as_array().unwrap().len(), 1);
    }

    // ==================== query routing ====================

    #[tokio::test]
    async fn test_query_routes_training_keyword_to_training_agent() {
        let (orch, _, _) = orchestrator();
        let result = orch
            .process_query("what training courses are available?", None, None)
            .await;
        assert!(result.success);
        assert_eq!(result.data["routed_to"], json!("training_agent"));
    }

    #[tokio::test]
    async fn test_query_falls_back_to_policy_agent() {
        let (orch, _, _) = orchestrator();
        let result = orch
            .process_query("how many days of annual leave do I get?", None, None)
            .await;
        assert!(result.success);
        assert_eq!(result.data["routed_to"], json!("policy_agent"));
    }

    #[tokio::test]
    async fn test_workflow_log_records_each_workflow() {
        let (orch, _, _) = orchestrator();
        orch.process_query("hello", None, None).await;
        orch.process_calculation("epf", json!({"salary": 4000.0, "jurisdiction": "MY"}), None)
            .await;

        let log = orch.workflow_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].workflow_type, "query");
        assert_eq!(log[1].workflow_type, "calculation");
    }
}
