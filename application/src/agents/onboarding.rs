//! Onboarding agent: the offer lifecycle and onboarding documents.
//!
//! Offers live in an in-memory map for the life of the process; the
//! durable offer table is an external collaborator reached through the
//! persistence boundary, not this core.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use uuid::Uuid;

use agentix_domain::{Capability, Jurisdiction};

use super::payload::{jurisdiction_or, optional_str, require_amount, require_str};
use super::{Agent, AgentError};
use crate::ports::{DocumentGenerator, DocumentRequest};

pub const ONBOARDING_AGENT_ID: &str = "onboarding_agent";

/// The closed set of onboarding actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OnboardingAction {
    CreateOffer,
    AcceptOffer,
    RejectOffer,
    GenerateOnboardingDocuments,
    GetOfferStatus,
}

impl FromStr for OnboardingAction {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create_offer" => Ok(OnboardingAction::CreateOffer),
            "accept_offer" => Ok(OnboardingAction::AcceptOffer),
            "reject_offer" => Ok(OnboardingAction::RejectOffer),
            "generate_onboarding_documents" => Ok(OnboardingAction::GenerateOnboardingDocuments),
            "get_offer_status" => Ok(OnboardingAction::GetOfferStatus),
            other => Err(AgentError::UnknownAction(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
}

/// One offer's lifecycle state
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Offer {
    offer_id: String,
    employee_id: String,
    employee_name: String,
    position: String,
    salary: f64,
    jurisdiction: Jurisdiction,
    status: OfferStatus,
    created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    probation_months: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejection_reason: Option<String>,
}

impl Offer {
    fn to_payload(&self) -> Value {
        // flat shape so validator agents can find salary/jurisdiction
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Manages offers and triggers onboarding document generation.
///
/// Declares both the policy and salary agents as cross-check peers:
/// every offer it emits is judged against statutory policy and salary
/// sanity bounds before a workflow commits it.
pub struct OnboardingAgent {
    documents: Arc<dyn DocumentGenerator>,
    offers: Mutex<HashMap<String, Offer>>,
}

impl OnboardingAgent {
    pub fn new(documents: Arc<dyn DocumentGenerator>) -> Self {
        Self {
            documents,
            offers: Mutex::new(HashMap::new()),
        }
    }

    fn offers(&self) -> std::sync::MutexGuard<'_, HashMap<String, Offer>> {
        self.offers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn create_offer(&self, payload: &Value) -> Result<Value, AgentError> {
        let employee = payload
            .get("employee_data")
            .ok_or_else(|| AgentError::MissingField("employee_data".to_string()))?;
        let details = payload
            .get("offer_details")
            .ok_or_else(|| AgentError::MissingField("offer_details".to_string()))?;

        let employee_name = require_str(employee, "name")?.to_string();
        let employee_id = optional_str(employee, "employee_id")
            .map(str::to_string)
            .unwrap_or_else(|| format!("E-{}", short_id()));

        let salary = require_amount(details, "salary")?;
        let position = require_str(details, "position")?.to_string();
        let jurisdiction = jurisdiction_or(details, Jurisdiction::My)?;

        let offer = Offer {
            offer_id: format!("OF-{}", short_id()),
            employee_id,
            employee_name,
            position,
            salary,
            jurisdiction,
            status: OfferStatus::Pending,
            created_at: Utc::now(),
            start_date: optional_str(details, "start_date").map(str::to_string),
            probation_months: details.get("probation_months").and_then(Value::as_u64),
            signature: None,
            rejection_reason: None,
        };

        let result = offer.to_payload();
        self.offers().insert(offer.offer_id.clone(), offer);
        Ok(result)
    }

    fn accept_offer(&self, payload: &Value) -> Result<Value, AgentError> {
        let offer_id = require_str(payload, "offer_id")?;
        let employee_id = require_str(payload, "employee_id")?;
        let signature = optional_str(payload, "signature").map(str::to_string);

        let mut offers = self.offers();
        let offer = offers
            .get_mut(offer_id)
            .ok_or_else(|| AgentError::InvalidPayload(format!("no such offer: {offer_id}")))?;

        if offer.employee_id != employee_id {
            return Err(AgentError::InvalidPayload(format!(
                "offer {offer_id} does not belong to employee {employee_id}"
            )));
        }
        if offer.status != OfferStatus::Pending {
            return Err(AgentError::InvalidPayload(format!(
                "offer {offer_id} is no longer pending"
            )));
        }

        offer.status = OfferStatus::Accepted;
        offer.signature = signature;
        Ok(offer.to_payload())
    }

    fn reject_offer(&self, payload: &Value) -> Result<Value, AgentError> {
        let offer_id = require_str(payload, "offer_id")?;
        let employee_id = require_str(payload, "employee_id")?;

        let mut offers = self.offers();
        let offer = offers
            .get_mut(offer_id)
            .ok_or_else(|| AgentError::InvalidPayload(format!("no such offer: {offer_id}")))?;

        if offer.employee_id != employee_id {
            return Err(AgentError::InvalidPayload(format!(
                "offer {offer_id} does not belong to employee {employee_id}"
            )));
        }
        if offer.status != OfferStatus::Pending {
            return Err(AgentError::InvalidPayload(format!(
                "offer {offer_id} is no longer pending"
            )));
        }

        offer.status = OfferStatus::Rejected;
        offer.rejection_reason = optional_str(payload, "reason").map(str::to_string);
        Ok(offer.to_payload())
    }

    async fn generate_documents(&self, payload: &Value) -> Result<Value, AgentError> {
        // prefer an offer record; fall back to inline fields
        let source = match optional_str(payload, "offer_id") {
            Some(id) => self
                .offers()
                .get(id)
                .map(|o| o.to_payload())
                .ok_or_else(|| AgentError::InvalidPayload(format!("no such offer: {id}")))?,
            None => payload.clone(),
        };

        let request_base = DocumentRequest {
            document_type: String::new(),
            employee_name: require_str(&source, "employee_name")?.to_string(),
            employee_id: require_str(&source, "employee_id")?.to_string(),
            position: require_str(&source, "position")?.to_string(),
            salary: require_amount(&source, "salary")?,
            jurisdiction: jurisdiction_or(&source, Jurisdiction::My)?,
            extra: Map::new(),
        };

        let mut documents = Vec::new();
        for document_type in ["employment_contract", "offer_letter"] {
            let request = DocumentRequest {
                document_type: document_type.to_string(),
                ..request_base.clone()
            };
            let generated = self.documents.generate(&request).await?;
            documents.push(json!({
                "document_type": document_type,
                "document_id": generated.document_id,
                "storage_path": generated.storage_path,
            }));
        }

        Ok(json!({
            "employee_id": request_base.employee_id,
            "documents": documents,
        }))
    }

    fn offer_status(&self, payload: &Value) -> Result<Value, AgentError> {
        let offer_id = require_str(payload, "offer_id")?;
        self.offers()
            .get(offer_id)
            .map(Offer::to_payload)
            .ok_or_else(|| AgentError::InvalidPayload(format!("no such offer: {offer_id}")))
    }
}

fn short_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

#[async_trait]
impl Agent for OnboardingAgent {
    fn id(&self) -> &str {
        ONBOARDING_AGENT_ID
    }

    fn capabilities(&self) -> &[Capability] {
        &[
            Capability::OnboardingManagement,
            Capability::DocumentGeneration,
        ]
    }

    fn actions(&self) -> &[&'static str] {
        &[
            "create_offer",
            "accept_offer",
            "reject_offer",
            "generate_onboarding_documents",
            "get_offer_status",
        ]
    }

    fn cross_check_agents(&self) -> &[&'static str] {
        &["policy_agent", "salary_agent"]
    }

    async fn handle(
        &self,
        action: &str,
        payload: &Value,
        _context: Option<&Value>,
    ) -> Result<Value, AgentError> {
        match OnboardingAction::from_str(action)? {
            OnboardingAction::CreateOffer => self.create_offer(payload),
            OnboardingAction::AcceptOffer => self.accept_offer(payload),
            OnboardingAction::RejectOffer => self.reject_offer(payload),
            OnboardingAction::GenerateOnboardingDocuments => self.generate_documents(payload).await,
            OnboardingAction::GetOfferStatus => self.offer_status(payload),
        }
    }
}
