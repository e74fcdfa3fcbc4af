//! Singaporean statutory contributions: CPF and SDL

use crate::core::money::round_cents;

use super::StatutoryBreakdown;

/// CPF ordinary-wage ceiling per month
pub const CPF_WAGE_CEILING: f64 = 6800.0;

/// SDL levy rate, with a statutory floor and cap per employee
pub const SDL_RATE: f64 = 0.0025;
pub const SDL_MIN: f64 = 2.0;
pub const SDL_MAX: f64 = 11.25;

/// Age-banded CPF rates: (age ceiling, employee rate, employer rate).
/// A band applies to ages up to and including its ceiling.
const CPF_AGE_BANDS: &[(u32, f64, f64)] = &[
    (55, 0.20, 0.17),
    (60, 0.17, 0.155),
    (65, 0.115, 0.12),
    (70, 0.075, 0.09),
    (u32::MAX, 0.05, 0.075),
];

/// CPF rates for an employee of the given age.
///
/// Returns `(employee_rate, employer_rate)`.
pub fn cpf_rates(age: u32) -> (f64, f64) {
    for &(ceiling, employee, employer) in CPF_AGE_BANDS {
        if age <= ceiling {
            return (employee, employer);
        }
    }
    unreachable!("final CPF band covers all ages")
}

/// Central Provident Fund contribution on ordinary wages, subject to
/// the monthly OW ceiling.
pub fn calculate_cpf(monthly_wage: f64, age: u32) -> StatutoryBreakdown {
    let assessed = monthly_wage.min(CPF_WAGE_CEILING);
    let (employee_rate, employer_rate) = cpf_rates(age);
    StatutoryBreakdown {
        scheme: "cpf".to_string(),
        assessed_wage: assessed,
        employee_rate,
        employee_contribution: round_cents(assessed * employee_rate),
        employer_rate,
        employer_contribution: round_cents(assessed * employer_rate),
    }
}

/// Skills Development Levy: employer-only, 0.25% of monthly wages,
/// floored at $2 and capped at $11.25.
pub fn calculate_sdl(monthly_wage: f64) -> StatutoryBreakdown {
    let levy = round_cents((monthly_wage * SDL_RATE).clamp(SDL_MIN, SDL_MAX));
    StatutoryBreakdown {
        scheme: "sdl".to_string(),
        assessed_wage: monthly_wage,
        employee_rate: 0.0,
        employee_contribution: 0.0,
        employer_rate: SDL_RATE,
        employer_contribution: levy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpf_under_55() {
        let cpf = calculate_cpf(5000.0, 30);
        assert_eq!(cpf.employee_contribution, 1000.00);
        assert_eq!(cpf.employer_contribution, 850.00);
    }

    #[test]
    fn test_cpf_wage_ceiling() {
        let cpf = calculate_cpf(10000.0, 40);
        assert_eq!(cpf.assessed_wage, 6800.0);
        assert_eq!(cpf.employee_contribution, 1360.00);
    }

    #[test]
    fn test_cpf_age_bands() {
        assert_eq!(cpf_rates(55), (0.20, 0.17));
        assert_eq!(cpf_rates(56), (0.17, 0.155));
        assert_eq!(cpf_rates(80), (0.05, 0.075));
    }

    #[test]
    fn test_sdl_floor_and_cap() {
        assert_eq!(calculate_sdl(400.0).employer_contribution, 2.00);
        assert_eq!(calculate_sdl(4000.0).employer_contribution, 10.00);
        assert_eq!(calculate_sdl(10000.0).employer_contribution, 11.25);
    }

    #[test]
    fn test_sdl_has_no_employee_share() {
        let sdl = calculate_sdl(3000.0);
        assert_eq!(sdl.employee_contribution, 0.0);
        assert_eq!(sdl.total(), sdl.employer_contribution);
    }
}
