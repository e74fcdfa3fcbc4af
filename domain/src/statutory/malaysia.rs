//! Malaysian statutory contributions: EPF, SOCSO, EIS

use crate::core::money::round_cents;

use super::StatutoryBreakdown;

/// EPF employee share, all wage bands
pub const EPF_EMPLOYEE_RATE: f64 = 0.11;
/// EPF employer share for monthly wages of RM5,000 and below
pub const EPF_EMPLOYER_RATE_LOW: f64 = 0.13;
/// EPF employer share above RM5,000
pub const EPF_EMPLOYER_RATE_HIGH: f64 = 0.12;
/// Wage threshold separating the two employer rates
pub const EPF_WAGE_THRESHOLD: f64 = 5000.0;

/// SOCSO and EIS assess wages only up to this ceiling
pub const SOCSO_WAGE_CEILING: f64 = 5000.0;
pub const SOCSO_EMPLOYEE_RATE: f64 = 0.005;
pub const SOCSO_EMPLOYER_RATE: f64 = 0.0175;
pub const EIS_RATE: f64 = 0.002;

/// EPF employer rate for a given monthly wage.
///
/// Wages at or below RM5,000 attract the 13% employer share.
pub fn epf_employer_rate(monthly_wage: f64) -> f64 {
    if monthly_wage <= EPF_WAGE_THRESHOLD {
        EPF_EMPLOYER_RATE_LOW
    } else {
        EPF_EMPLOYER_RATE_HIGH
    }
}

/// Employees Provident Fund contribution for one month's wages.
pub fn calculate_epf(monthly_wage: f64) -> StatutoryBreakdown {
    let employer_rate = epf_employer_rate(monthly_wage);
    StatutoryBreakdown {
        scheme: "epf".to_string(),
        assessed_wage: monthly_wage,
        employee_rate: EPF_EMPLOYEE_RATE,
        employee_contribution: round_cents(monthly_wage * EPF_EMPLOYEE_RATE),
        employer_rate,
        employer_contribution: round_cents(monthly_wage * employer_rate),
    }
}

/// SOCSO (PERKESO) contribution under the combined injury and
/// invalidity schemes, assessed on wages up to the RM5,000 ceiling.
pub fn calculate_socso(monthly_wage: f64) -> StatutoryBreakdown {
    let assessed = monthly_wage.min(SOCSO_WAGE_CEILING);
    StatutoryBreakdown {
        scheme: "socso".to_string(),
        assessed_wage: assessed,
        employee_rate: SOCSO_EMPLOYEE_RATE,
        employee_contribution: round_cents(assessed * SOCSO_EMPLOYEE_RATE),
        employer_rate: SOCSO_EMPLOYER_RATE,
        employer_contribution: round_cents(assessed * SOCSO_EMPLOYER_RATE),
    }
}

/// Employment Insurance System contribution, 0.2% each side, same
/// wage ceiling as SOCSO.
pub fn calculate_eis(monthly_wage: f64) -> StatutoryBreakdown {
    let assessed = monthly_wage.min(SOCSO_WAGE_CEILING);
    StatutoryBreakdown {
        scheme: "eis".to_string(),
        assessed_wage: assessed,
        employee_rate: EIS_RATE,
        employee_contribution: round_cents(assessed * EIS_RATE),
        employer_rate: EIS_RATE,
        employer_contribution: round_cents(assessed * EIS_RATE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epf_at_4000() {
        let epf = calculate_epf(4000.0);
        assert_eq!(epf.employee_contribution, 440.00);
        assert_eq!(epf.employer_rate, 0.13);
        assert_eq!(epf.employer_contribution, 520.00);
    }

    #[test]
    fn test_epf_employer_rate_threshold() {
        // the 13% band is inclusive of exactly RM5,000
        assert_eq!(epf_employer_rate(5000.0), 0.13);
        assert_eq!(epf_employer_rate(5000.01), 0.12);
    }

    #[test]
    fn test_epf_above_threshold() {
        let epf = calculate_epf(6000.0);
        assert_eq!(epf.employee_contribution, 660.00);
        assert_eq!(epf.employer_contribution, 720.00);
    }

    #[test]
    fn test_socso_is_capped() {
        let socso = calculate_socso(8000.0);
        assert_eq!(socso.assessed_wage, 5000.0);
        assert_eq!(socso.employee_contribution, 25.00);
        assert_eq!(socso.employer_contribution, 87.50);
    }

    #[test]
    fn test_eis_symmetric_rates() {
        let eis = calculate_eis(3000.0);
        assert_eq!(eis.employee_contribution, 6.00);
        assert_eq!(eis.employer_contribution, 6.00);
        assert_eq!(eis.total(), 12.00);
    }
}
