//! Statutory contribution schedules
//!
//! Jurisdiction-mandated payroll contributions: EPF, SOCSO, and EIS
//! for Malaysia; CPF and SDL for Singapore. These are pure decision
//! tables, the data-heavy half of the salary agent, and the same
//! tables back the policy agent's cross-check recomputation.

pub mod malaysia;
pub mod singapore;

use serde::{Deserialize, Serialize};

/// Breakdown of one statutory scheme for one month's wages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatutoryBreakdown {
    /// Scheme key: "epf", "socso", "eis", "cpf", "sdl"
    pub scheme: String,
    /// Wage the contribution was assessed on (after any ceiling)
    pub assessed_wage: f64,
    pub employee_rate: f64,
    pub employee_contribution: f64,
    pub employer_rate: f64,
    pub employer_contribution: f64,
}

impl StatutoryBreakdown {
    pub fn total(&self) -> f64 {
        crate::core::money::round_cents(self.employee_contribution + self.employer_contribution)
    }
}
