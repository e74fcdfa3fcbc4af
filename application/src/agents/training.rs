//! Training agent: onboarding modules and the training catalog.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::{Value, json};

use agentix_domain::{Capability, Jurisdiction};

use super::payload::{jurisdiction_or, optional_str, require_str};
use super::{Agent, AgentError};

pub const TRAINING_AGENT_ID: &str = "training_agent";

/// Days a newly assigned module is due in
const ASSIGNMENT_DUE_DAYS: i64 = 30;

/// The closed set of training actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrainingAction {
    GetOnboardingTraining,
    AssignTraining,
    GetTrainingCatalog,
}

impl FromStr for TrainingAction {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "get_onboarding_training" => Ok(TrainingAction::GetOnboardingTraining),
            "assign_training" => Ok(TrainingAction::AssignTraining),
            "get_training_catalog" => Ok(TrainingAction::GetTrainingCatalog),
            other => Err(AgentError::UnknownAction(other.to_string())),
        }
    }
}

/// Modules every new hire takes, regardless of jurisdiction
const CORE_MODULES: &[&str] = &["Code of Conduct", "Information Security Basics"];

/// Jurisdiction-mandated modules
const MY_MODULES: &[&str] = &[
    "Workplace Safety (OSHA 1994)",
    "PDPA Awareness (Malaysia)",
    "Anti-Bribery (MACC Act s.17A)",
];
const SG_MODULES: &[&str] = &[
    "Workplace Safety and Health",
    "PDPA Awareness (Singapore)",
];

/// Role-keyed extras appended to the mandatory set
const ROLE_MODULES: &[(&str, &[&str])] = &[
    ("engineering", &["Secure Development Lifecycle"]),
    ("sales", &["Fair Dealing and Anti-Competition"]),
    ("finance", &["Financial Controls and AML"]),
];

/// Serves onboarding module lists and records training assignments.
#[derive(Debug, Default)]
pub struct TrainingAgent;

impl TrainingAgent {
    pub fn new() -> Self {
        Self
    }

    fn modules_for(jurisdiction: Jurisdiction, role: Option<&str>) -> Vec<String> {
        let mut modules: Vec<String> = CORE_MODULES.iter().map(|m| m.to_string()).collect();
        let mandated = match jurisdiction {
            Jurisdiction::My => MY_MODULES,
            Jurisdiction::Sg => SG_MODULES,
        };
        modules.extend(mandated.iter().map(|m| m.to_string()));

        if let Some(role) = role {
            let role_lower = role.to_lowercase();
            for (key, extras) in ROLE_MODULES {
                if role_lower.contains(key) {
                    modules.extend(extras.iter().map(|m| m.to_string()));
                }
            }
        }
        modules
    }

    fn onboarding_training(payload: &Value) -> Result<Value, AgentError> {
        let jurisdiction = jurisdiction_or(payload, Jurisdiction::My)?;
        let role = optional_str(payload, "position").or_else(|| optional_str(payload, "role"));
        let modules = Self::modules_for(jurisdiction, role);
        Ok(json!({
            "jurisdiction": jurisdiction.as_str(),
            "modules": modules,
            "mandatory": true,
        }))
    }

    fn assign_training(payload: &Value) -> Result<Value, AgentError> {
        let employee_id = require_str(payload, "employee_id")?;
        let modules: Vec<String> = match payload.get("modules") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            Some(_) => {
                return Err(AgentError::InvalidPayload(
                    "field 'modules' must be an array of strings".to_string(),
                ));
            }
            None => {
                let jurisdiction = jurisdiction_or(payload, Jurisdiction::My)?;
                Self::modules_for(jurisdiction, optional_str(payload, "position"))
            }
        };

        let due = Utc::now() + Duration::days(ASSIGNMENT_DUE_DAYS);
        Ok(json!({
            "employee_id": employee_id,
            "assigned": modules,
            "due_date": due.to_rfc3339(),
        }))
    }

    fn catalog(payload: &Value) -> Result<Value, AgentError> {
        let jurisdiction = jurisdiction_or(payload, Jurisdiction::My)?;
        let mandated = match jurisdiction {
            Jurisdiction::My => MY_MODULES,
            Jurisdiction::Sg => SG_MODULES,
        };
        Ok(json!({
            "jurisdiction": jurisdiction.as_str(),
            "core": CORE_MODULES,
            "jurisdiction_mandated": mandated,
            "role_specific": ROLE_MODULES
                .iter()
                .map(|(role, modules)| json!({"role": role, "modules": modules}))
                .collect::<Vec<_>>(),
        }))
    }
}

#[async_trait]
impl Agent for TrainingAgent {
    fn id(&self) -> &str {
        TRAINING_AGENT_ID
    }

    fn capabilities(&self) -> &[Capability] {
        &[Capability::TrainingManagement]
    }

    fn actions(&self) -> &[&'static str] {
        &[
            "get_onboarding_training",
            "assign_training",
            "get_training_catalog",
        ]
    }

    async fn handle(
        &self,
        action: &str,
        payload: &Value,
        _context: Option<&Value>,
    ) -> Result<Value, AgentError> {
        match TrainingAction::from_str(action)? {
            TrainingAction::GetOnboardingTraining => Self::onboarding_training(payload),
            TrainingAction::AssignTraining => Self::assign_training(payload),
            TrainingAction::GetTrainingCatalog => Self::catalog(payload),
        }
    }
}
