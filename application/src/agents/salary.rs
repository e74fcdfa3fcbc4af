//! Salary agent: statutory and payroll computations.

use std::str::FromStr;

use async_trait::async_trait;
use serde_json::{Value, json};

use agentix_domain::statutory::{StatutoryBreakdown, malaysia, singapore};
use agentix_domain::{Capability, CrossCheckResult, Jurisdiction, core::money::round_cents};

use super::payload::{jurisdiction_or, optional_u32, require_amount};
use super::{Agent, AgentError};

pub const SALARY_AGENT_ID: &str = "salary_agent";

/// Malaysian statutory minimum monthly wage, used when sanity-checking
/// offers from the onboarding agent.
const MY_MINIMUM_WAGE: f64 = 1700.0;

/// CPF age assumed when an offer or calculation does not carry one
const DEFAULT_CPF_AGE: u32 = 30;

/// The closed set of salary actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SalaryAction {
    CalculateEpf,
    CalculateSocso,
    CalculateEis,
    CalculateCpf,
    CalculateSdl,
    CalculateSalaryPackage,
}

impl FromStr for SalaryAction {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "calculate_epf" => Ok(SalaryAction::CalculateEpf),
            "calculate_socso" => Ok(SalaryAction::CalculateSocso),
            "calculate_eis" => Ok(SalaryAction::CalculateEis),
            "calculate_cpf" => Ok(SalaryAction::CalculateCpf),
            "calculate_sdl" => Ok(SalaryAction::CalculateSdl),
            "calculate_salary_package" => Ok(SalaryAction::CalculateSalaryPackage),
            other => Err(AgentError::UnknownAction(other.to_string())),
        }
    }
}

/// Computes statutory contributions and salary packages.
///
/// Declares the policy agent as its cross-check peer: every
/// cross-checked calculation is recomputed against the statutory
/// tables before a workflow commits it.
#[derive(Debug, Default)]
pub struct SalaryAgent;

impl SalaryAgent {
    pub fn new() -> Self {
        Self
    }

    fn require_jurisdiction(
        payload: &Value,
        expected: Jurisdiction,
        scheme: &str,
    ) -> Result<(), AgentError> {
        let jurisdiction = jurisdiction_or(payload, expected)?;
        if jurisdiction != expected {
            return Err(AgentError::UnsupportedJurisdiction(format!(
                "{jurisdiction} has no {scheme} scheme"
            )));
        }
        Ok(())
    }

    fn calculation_result(
        calculation_type: &str,
        jurisdiction: Jurisdiction,
        salary: f64,
        breakdown: &StatutoryBreakdown,
    ) -> Value {
        json!({
            "calculation_type": calculation_type,
            "jurisdiction": jurisdiction.as_str(),
            "values": {
                "salary": salary,
                "assessed_wage": breakdown.assessed_wage,
                "employee_rate": breakdown.employee_rate,
                "employee_contribution": breakdown.employee_contribution,
                "employer_rate": breakdown.employer_rate,
                "employer_contribution": breakdown.employer_contribution,
            },
        })
    }

    fn salary_package(payload: &Value) -> Result<Value, AgentError> {
        let salary = require_amount(payload, "salary")?;
        let jurisdiction = jurisdiction_or(payload, Jurisdiction::My)?;

        let components: Vec<StatutoryBreakdown> = match jurisdiction {
            Jurisdiction::My => vec![
                malaysia::calculate_epf(salary),
                malaysia::calculate_socso(salary),
                malaysia::calculate_eis(salary),
            ],
            Jurisdiction::Sg => {
                let age = optional_u32(payload, "age").unwrap_or(DEFAULT_CPF_AGE);
                vec![
                    singapore::calculate_cpf(salary, age),
                    singapore::calculate_sdl(salary),
                ]
            }
        };

        let employee_deductions =
            round_cents(components.iter().map(|c| c.employee_contribution).sum());
        let employer_contributions =
            round_cents(components.iter().map(|c| c.employer_contribution).sum());

        Ok(json!({
            "calculation_type": "salary_package",
            "jurisdiction": jurisdiction.as_str(),
            "values": {
                "gross_salary": salary,
                "employee_deductions": employee_deductions,
                "net_salary": round_cents(salary - employee_deductions),
                "employer_contributions": employer_contributions,
                "employer_cost": round_cents(salary + employer_contributions),
                "components": components,
            },
        }))
    }
}

#[async_trait]
impl Agent for SalaryAgent {
    fn id(&self) -> &str {
        SALARY_AGENT_ID
    }

    fn capabilities(&self) -> &[Capability] {
        &[Capability::SalaryCalculation, Capability::Compliance]
    }

    fn actions(&self) -> &[&'static str] {
        &[
            "calculate_epf",
            "calculate_socso",
            "calculate_eis",
            "calculate_cpf",
            "calculate_sdl",
            "calculate_salary_package",
        ]
    }

    fn cross_check_agents(&self) -> &[&'static str] {
        &["policy_agent"]
    }

    async fn handle(
        &self,
        action: &str,
        payload: &Value,
        _context: Option<&Value>,
    ) -> Result<Value, AgentError> {
        match SalaryAction::from_str(action)? {
            SalaryAction::CalculateEpf => {
                Self::require_jurisdiction(payload, Jurisdiction::My, "EPF")?;
                let salary = require_amount(payload, "salary")?;
                let breakdown = malaysia::calculate_epf(salary);
                Ok(Self::calculation_result("epf", Jurisdiction::My, salary, &breakdown))
            }
            SalaryAction::CalculateSocso => {
                Self::require_jurisdiction(payload, Jurisdiction::My, "SOCSO")?;
                let salary = require_amount(payload, "salary")?;
                let breakdown = malaysia::calculate_socso(salary);
                Ok(Self::calculation_result("socso", Jurisdiction::My, salary, &breakdown))
            }
            SalaryAction::CalculateEis => {
                Self::require_jurisdiction(payload, Jurisdiction::My, "EIS")?;
                let salary = require_amount(payload, "salary")?;
                let breakdown = malaysia::calculate_eis(salary);
                Ok(Self::calculation_result("eis", Jurisdiction::My, salary, &breakdown))
            }
            SalaryAction::CalculateCpf => {
                Self::require_jurisdiction(payload, Jurisdiction::Sg, "CPF")?;
                let salary = require_amount(payload, "salary")?;
                let age = optional_u32(payload, "age").unwrap_or(DEFAULT_CPF_AGE);
                let breakdown = singapore::calculate_cpf(salary, age);
                Ok(Self::calculation_result("cpf", Jurisdiction::Sg, salary, &breakdown))
            }
            SalaryAction::CalculateSdl => {
                Self::require_jurisdiction(payload, Jurisdiction::Sg, "SDL")?;
                let salary = require_amount(payload, "salary")?;
                let breakdown = singapore::calculate_sdl(salary);
                Ok(Self::calculation_result("sdl", Jurisdiction::Sg, salary, &breakdown))
            }
            SalaryAction::CalculateSalaryPackage => Self::salary_package(payload),
        }
    }

    /// Sanity-check an offer produced by the onboarding agent.
    fn validate_cross_check(&self, payload: &Value) -> CrossCheckResult {
        let salary = payload
            .get("salary")
            .or_else(|| payload.pointer("/offer/salary"))
            .and_then(Value::as_f64);

        let Some(salary) = salary else {
            return CrossCheckResult::needs_review(
                SALARY_AGENT_ID,
                "no salary figure found to verify",
            );
        };

        if salary <= 0.0 {
            return CrossCheckResult::invalid(
                SALARY_AGENT_ID,
                format!("offer salary {salary} is not positive"),
            );
        }

        let jurisdiction = payload
            .get("jurisdiction")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<Jurisdiction>().ok());

        if jurisdiction == Some(Jurisdiction::My) && salary < MY_MINIMUM_WAGE {
            return CrossCheckResult::invalid(
                SALARY_AGENT_ID,
                format!("salary below Malaysian minimum wage of RM{MY_MINIMUM_WAGE}"),
            )
            .with_correction("salary", json!(MY_MINIMUM_WAGE));
        }

        CrossCheckResult::valid(SALARY_AGENT_ID, "salary figures within expected bounds")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn run(action: &str, payload: Value) -> Result<Value, AgentError> {
        SalaryAgent::new().handle(action, &payload, None).await
    }

    #[tokio::test]
    async fn test_calculate_epf_my_4000() {
        let result = run("calculate_epf", json!({"salary": 4000, "jurisdiction": "MY"}))
            .await
            .unwrap();
        let values = &result["values"];
        assert_eq!(values["employee_contribution"], json!(440.0));
        assert_eq!(values["employer_rate"], json!(0.13));
        assert_eq!(values["employer_contribution"], json!(520.0));
    }

    #[tokio::test]
    async fn test_epf_rejects_singapore() {
        let err = run("calculate_epf", json!({"salary": 4000, "jurisdiction": "SG"}))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::UnsupportedJurisdiction(_)));
    }

    #[tokio::test]
    async fn test_missing_salary_is_reported() {
        let err = run("calculate_epf", json!({})).await.unwrap_err();
        assert!(matches!(err, AgentError::MissingField(_)));
    }

    #[tokio::test]
    async fn test_cpf_uses_age_band() {
        let result = run(
            "calculate_cpf",
            json!({"salary": 5000, "jurisdiction": "SG", "age": 62}),
        )
        .await
        .unwrap();
        assert_eq!(result["values"]["employee_rate"], json!(0.115));
    }

    #[tokio::test]
    async fn test_salary_package_my_nets_out() {
        let result = run(
            "calculate_salary_package",
            json!({"salary": 4000, "jurisdiction": "MY"}),
        )
        .await
        .unwrap();
        let values = &result["values"];
        // epf 440 + socso 20 + eis 8
        assert_eq!(values["employee_deductions"], json!(468.0));
        assert_eq!(values["net_salary"], json!(3532.0));
        assert_eq!(values["components"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_action() {
        let err = run("calculate_bonus_pool", json!({})).await.unwrap_err();
        assert!(matches!(err, AgentError::UnknownAction(_)));
    }

    #[test]
    fn test_cross_check_flags_below_minimum_wage() {
        let agent = SalaryAgent::new();
        let check = agent.validate_cross_check(&json!({
            "offer_id": "OF-1",
            "salary": 1200.0,
            "jurisdiction": "MY",
        }));
        assert!(check.is_invalid());
        assert_eq!(check.corrections["salary"], json!(1700.0));
    }

    #[test]
    fn test_cross_check_without_salary_needs_review() {
        let agent = SalaryAgent::new();
        let check = agent.validate_cross_check(&json!({"status": "accepted"}));
        assert_eq!(
            check.result,
            agentix_domain::ValidationResult::NeedsReview
        );
    }
}
