//! Capabilities that a query can be routed to

use serde::{Deserialize, Serialize};

/// A routing target: the class of HR work a query belongs to.
///
/// Every agent advertises one or more capabilities; the
/// [`IntentClassifier`](super::classifier::IntentClassifier) maps free
/// text onto exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Researching employment law, policies, and entitlements
    PolicyResearch,
    /// Statutory contributions and regulatory compliance
    Compliance,
    /// Salary, deduction, and contribution computations
    SalaryCalculation,
    /// Leave balances and leave policy questions
    LeaveManagement,
    /// Training catalogs and onboarding modules
    TrainingManagement,
    /// Offer lifecycle and new-hire onboarding
    OnboardingManagement,
    /// Contracts, letters, and other generated documents
    DocumentGeneration,
    /// Catch-all employee helpdesk
    EmployeeSupport,
    /// Generic HR front door. Never a terminal routing target: the
    /// classifier remaps it to [`Capability::EmployeeSupport`].
    MainHr,
}

impl Capability {
    pub fn as_str(&self) -> &str {
        match self {
            Capability::PolicyResearch => "policy_research",
            Capability::Compliance => "compliance",
            Capability::SalaryCalculation => "salary_calculation",
            Capability::LeaveManagement => "leave_management",
            Capability::TrainingManagement => "training_management",
            Capability::OnboardingManagement => "onboarding_management",
            Capability::DocumentGeneration => "document_generation",
            Capability::EmployeeSupport => "employee_support",
            Capability::MainHr => "main_hr",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
