//! Policy agent: employment policy lookups, compliance checks, and the
//! rate-table cross-check that guards salary and onboarding outputs.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use agentix_domain::statutory::{malaysia, singapore};
use agentix_domain::{Capability, CrossCheckResult, Jurisdiction};

use super::payload::{jurisdiction_or, optional_str, require_amount, require_str};
use super::{Agent, AgentError};
use crate::ports::KnowledgeBase;

pub const POLICY_AGENT_ID: &str = "policy_agent";

/// Tolerance when comparing recomputed statutory rates
const RATE_TOLERANCE: f64 = 1e-6;

/// Malaysian statutory minimum monthly wage
const MY_MINIMUM_WAGE: f64 = 1700.0;

/// Longest probation period the company policy allows, in months
const MAX_PROBATION_MONTHS: u64 = 6;

/// The closed set of policy actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PolicyAction {
    GetPolicy,
    HrQuery,
    CheckCompliance,
    ValidateOffer,
}

impl FromStr for PolicyAction {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "get_policy" => Ok(PolicyAction::GetPolicy),
            "hr_query" => Ok(PolicyAction::HrQuery),
            "check_compliance" => Ok(PolicyAction::CheckCompliance),
            "validate_offer" => Ok(PolicyAction::ValidateOffer),
            other => Err(AgentError::UnknownAction(other.to_string())),
        }
    }
}

/// Built-in policy summaries: (jurisdiction, topic, summary, source).
/// Deeper questions go through the knowledge base port.
const POLICY_TOPICS: &[(Jurisdiction, &str, &str, &str)] = &[
    (
        Jurisdiction::My,
        "annual_leave",
        "8 days per year for service under 2 years, 12 days for 2-5 years, 16 days after",
        "Employment Act 1955, s.60E",
    ),
    (
        Jurisdiction::My,
        "sick_leave",
        "14 days per year under 2 years of service, up to 22 days after five years; 60 days where hospitalization is necessary",
        "Employment Act 1955, s.60F",
    ),
    (
        Jurisdiction::My,
        "maternity_leave",
        "98 consecutive days of paid maternity leave",
        "Employment Act 1955, s.37",
    ),
    (
        Jurisdiction::My,
        "working_hours",
        "45 hours per week maximum",
        "Employment Act 1955, s.60A",
    ),
    (
        Jurisdiction::Sg,
        "annual_leave",
        "7 days in the first year of service, one more day per year up to 14",
        "Employment Act (SG), s.43",
    ),
    (
        Jurisdiction::Sg,
        "sick_leave",
        "14 days outpatient and 60 days hospitalization leave after 6 months of service",
        "Employment Act (SG), s.89",
    ),
    (
        Jurisdiction::Sg,
        "maternity_leave",
        "16 weeks of government-paid maternity leave for eligible mothers",
        "Child Development Co-Savings Act",
    ),
    (
        Jurisdiction::Sg,
        "working_hours",
        "44 hours per week maximum",
        "Employment Act (SG), s.38",
    ),
];

/// Answers policy questions and cross-checks peer outputs against the
/// statutory tables.
pub struct PolicyAgent {
    knowledge: Arc<dyn KnowledgeBase>,
}

impl PolicyAgent {
    pub fn new(knowledge: Arc<dyn KnowledgeBase>) -> Self {
        Self { knowledge }
    }

    fn get_policy(payload: &Value) -> Result<Value, AgentError> {
        let topic = require_str(payload, "topic")?;
        let jurisdiction = jurisdiction_or(payload, Jurisdiction::My)?;

        let entry = POLICY_TOPICS
            .iter()
            .find(|(j, t, _, _)| *j == jurisdiction && *t == topic);

        match entry {
            Some((_, topic, summary, source)) => Ok(json!({
                "topic": topic,
                "jurisdiction": jurisdiction.as_str(),
                "summary": summary,
                "source": source,
            })),
            None => {
                let available: Vec<&str> = POLICY_TOPICS
                    .iter()
                    .filter(|(j, _, _, _)| *j == jurisdiction)
                    .map(|(_, t, _, _)| *t)
                    .collect();
                Ok(json!({
                    "topic": topic,
                    "jurisdiction": jurisdiction.as_str(),
                    "summary": Value::Null,
                    "available_topics": available,
                }))
            }
        }
    }

    async fn hr_query(&self, payload: &Value) -> Result<Value, AgentError> {
        let query = require_str(payload, "query")?;
        let jurisdiction = optional_str(payload, "jurisdiction")
            .and_then(|s| s.parse::<Jurisdiction>().ok());
        let answer = self.knowledge.query(query, jurisdiction).await?;
        Ok(json!({
            "query": query,
            "answer": answer.answer,
            "citations": answer.citations,
        }))
    }

    fn check_compliance(payload: &Value) -> Result<Value, AgentError> {
        let salary = require_amount(payload, "salary")?;
        let jurisdiction = jurisdiction_or(payload, Jurisdiction::My)?;

        let schemes = match jurisdiction {
            Jurisdiction::My => json!([
                {"scheme": "epf", "employee_rate": malaysia::EPF_EMPLOYEE_RATE,
                 "employer_rate": malaysia::epf_employer_rate(salary)},
                {"scheme": "socso", "employee_rate": malaysia::SOCSO_EMPLOYEE_RATE,
                 "employer_rate": malaysia::SOCSO_EMPLOYER_RATE},
                {"scheme": "eis", "employee_rate": malaysia::EIS_RATE,
                 "employer_rate": malaysia::EIS_RATE},
            ]),
            Jurisdiction::Sg => {
                let age = payload.get("age").and_then(Value::as_u64).unwrap_or(30) as u32;
                let (employee, employer) = singapore::cpf_rates(age);
                json!([
                    {"scheme": "cpf", "employee_rate": employee, "employer_rate": employer},
                    {"scheme": "sdl", "employee_rate": 0.0, "employer_rate": singapore::SDL_RATE},
                ])
            }
        };

        Ok(json!({
            "jurisdiction": jurisdiction.as_str(),
            "salary": salary,
            "required_schemes": schemes,
        }))
    }

    fn validate_offer(payload: &Value) -> Result<Value, AgentError> {
        let mut issues: Vec<String> = Vec::new();

        let salary = payload.get("salary").and_then(Value::as_f64);
        let jurisdiction = optional_str(payload, "jurisdiction")
            .and_then(|s| s.parse::<Jurisdiction>().ok());

        match salary {
            None => issues.push("offer has no salary".to_string()),
            Some(s) if s <= 0.0 => issues.push("salary must be positive".to_string()),
            Some(s) => {
                if jurisdiction == Some(Jurisdiction::My) && s < MY_MINIMUM_WAGE {
                    issues.push(format!(
                        "salary below Malaysian minimum wage of RM{MY_MINIMUM_WAGE}"
                    ));
                }
            }
        }

        if jurisdiction.is_none() {
            issues.push("offer has no recognized jurisdiction".to_string());
        }

        if let Some(months) = payload.get("probation_months").and_then(Value::as_u64) {
            if months > MAX_PROBATION_MONTHS {
                issues.push(format!(
                    "probation of {months} months exceeds the {MAX_PROBATION_MONTHS}-month policy cap"
                ));
            }
        }

        Ok(json!({
            "valid": issues.is_empty(),
            "issues": issues,
        }))
    }

    /// Recompute the statutory rates for a calculation payload and
    /// compare them against what the salary agent reported.
    fn check_calculation(calc_type: &str, payload: &Value) -> CrossCheckResult {
        let values = match payload.get("values") {
            Some(v) => v,
            None => {
                return CrossCheckResult::needs_review(
                    POLICY_AGENT_ID,
                    "calculation payload has no values to verify",
                );
            }
        };
        let salary = values.get("salary").and_then(Value::as_f64).unwrap_or(0.0);

        let expected: Option<(f64, f64)> = match calc_type {
            "epf" => Some((malaysia::EPF_EMPLOYEE_RATE, malaysia::epf_employer_rate(salary))),
            "socso" => Some((malaysia::SOCSO_EMPLOYEE_RATE, malaysia::SOCSO_EMPLOYER_RATE)),
            "eis" => Some((malaysia::EIS_RATE, malaysia::EIS_RATE)),
            "cpf" => {
                let age = values.get("age").and_then(Value::as_u64).unwrap_or(30) as u32;
                Some(singapore::cpf_rates(age))
            }
            "sdl" => Some((0.0, singapore::SDL_RATE)),
            "salary_package" => None,
            _ => {
                return CrossCheckResult::needs_review(
                    POLICY_AGENT_ID,
                    format!("no validation rule for calculation type '{calc_type}'"),
                );
            }
        };

        match expected {
            Some((employee_expected, employer_expected)) => {
                let mut check = CrossCheckResult::valid(
                    POLICY_AGENT_ID,
                    format!("{calc_type} rates match the statutory schedule"),
                );
                let mut mismatches: Vec<String> = Vec::new();

                if let Some(rate) = values.get("employee_rate").and_then(Value::as_f64) {
                    if (rate - employee_expected).abs() > RATE_TOLERANCE {
                        mismatches.push(format!(
                            "employee rate {rate} should be {employee_expected}"
                        ));
                        check = check.with_correction("employee_rate", json!(employee_expected));
                    }
                }
                if let Some(rate) = values.get("employer_rate").and_then(Value::as_f64) {
                    if (rate - employer_expected).abs() > RATE_TOLERANCE {
                        mismatches.push(format!(
                            "employer rate {rate} should be {employer_expected}"
                        ));
                        check = check.with_correction("employer_rate", json!(employer_expected));
                    }
                }

                if mismatches.is_empty() {
                    check
                } else {
                    check.result = agentix_domain::ValidationResult::Invalid;
                    check.notes = mismatches.join("; ");
                    check
                }
            }
            None => {
                // salary_package: verify the arithmetic is internally consistent
                let gross = values.get("gross_salary").and_then(Value::as_f64);
                let deductions = values.get("employee_deductions").and_then(Value::as_f64);
                let net = values.get("net_salary").and_then(Value::as_f64);
                match (gross, deductions, net) {
                    (Some(g), Some(d), Some(n)) if (g - d - n).abs() < 0.01 => {
                        CrossCheckResult::valid(POLICY_AGENT_ID, "package arithmetic consistent")
                    }
                    (Some(_), Some(_), Some(_)) => CrossCheckResult::invalid(
                        POLICY_AGENT_ID,
                        "net salary does not equal gross minus deductions",
                    ),
                    _ => CrossCheckResult::needs_review(
                        POLICY_AGENT_ID,
                        "package payload missing gross/deduction/net figures",
                    ),
                }
            }
        }
    }

    /// Sanity-check an offer-shaped payload from the onboarding agent.
    fn check_offer(payload: &Value) -> CrossCheckResult {
        let salary = payload.get("salary").and_then(Value::as_f64);
        let jurisdiction = payload
            .get("jurisdiction")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<Jurisdiction>().ok());

        match (salary, jurisdiction) {
            (Some(s), _) if s <= 0.0 => {
                CrossCheckResult::invalid(POLICY_AGENT_ID, "offer salary is not positive")
            }
            (Some(s), Some(Jurisdiction::My)) if s < MY_MINIMUM_WAGE => {
                CrossCheckResult::invalid(
                    POLICY_AGENT_ID,
                    format!("offer salary below Malaysian minimum wage of RM{MY_MINIMUM_WAGE}"),
                )
                .with_correction("salary", json!(MY_MINIMUM_WAGE))
            }
            (Some(_), Some(_)) => {
                CrossCheckResult::valid(POLICY_AGENT_ID, "offer meets statutory policy")
            }
            _ => CrossCheckResult::needs_review(
                POLICY_AGENT_ID,
                "offer missing salary or jurisdiction",
            ),
        }
    }
}

#[async_trait]
impl Agent for PolicyAgent {
    fn id(&self) -> &str {
        POLICY_AGENT_ID
    }

    fn capabilities(&self) -> &[Capability] {
        &[Capability::PolicyResearch, Capability::Compliance]
    }

    fn actions(&self) -> &[&'static str] {
        &["get_policy", "hr_query", "check_compliance", "validate_offer"]
    }

    async fn handle(
        &self,
        action: &str,
        payload: &Value,
        _context: Option<&Value>,
    ) -> Result<Value, AgentError> {
        match PolicyAction::from_str(action)? {
            PolicyAction::GetPolicy => Self::get_policy(payload),
            PolicyAction::HrQuery => self.hr_query(payload).await,
            PolicyAction::CheckCompliance => Self::check_compliance(payload),
            PolicyAction::ValidateOffer => Self::validate_offer(payload),
        }
    }

    fn validate_cross_check(&self, payload: &Value) -> CrossCheckResult {
        if let Some(calc_type) = payload.get("calculation_type").and_then(Value::as_str) {
            return Self::check_calculation(calc_type, payload);
        }
        if payload.get("offer_id").is_some() || payload.get("salary").is_some() {
            return Self::check_offer(payload);
        }
        CrossCheckResult::needs_review(POLICY_AGENT_ID, "unrecognized payload shape")
    }
}
