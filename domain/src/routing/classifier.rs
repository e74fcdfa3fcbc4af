//! Intent classification
//!
//! Maps a free-text HR query onto a [`Capability`] with a confidence
//! score. This is pure domain logic: no I/O, no LLM calls, just an
//! ordered keyword table and regex scoring.
//!
//! The pipeline, in order:
//!
//! 1. **Priority overrides**: operationally critical terms ("epf",
//!    "contract", "talk to hr") route deterministically at 0.95.
//! 2. **Pattern scoring**: each capability's regex list adds 1.0 per
//!    match, cumulative.
//! 3. **Complexity boost**: two or more legal keywords multiply the
//!    PolicyResearch and Compliance scores by 1.5.
//! 4. **Selection**: maximum score over a fixed-order table; the
//!    first-declared capability wins ties, so routing is deterministic.
//! 5. **Fallback**: a winning score below 1.0, or a MainHr winner,
//!    becomes (EmployeeSupport, 0.5).

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::capability::Capability;

/// Confidence assigned to a priority-keyword hit
const PRIORITY_CONFIDENCE: f64 = 0.95;

/// Confidence assigned to the EmployeeSupport fallback
const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Minimum winning score; anything lower falls back to EmployeeSupport
const MIN_WINNING_SCORE: f64 = 1.0;

/// Score multiplier applied to the specialist capabilities when the
/// query reads as legal/complex
const COMPLEXITY_BOOST: f64 = 1.5;

/// A routing decision: the chosen capability and how sure we are.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub capability: Capability,
    /// In `[0.0, 1.0]`
    pub confidence: f64,
}

/// Priority keyword table, scanned in declaration order (substring,
/// case-insensitive). First hit wins and bypasses scoring entirely.
const PRIORITY_KEYWORDS: &[(&str, Capability)] = &[
    ("epf", Capability::Compliance),
    ("kwsp", Capability::Compliance),
    ("socso", Capability::Compliance),
    ("perkeso", Capability::Compliance),
    ("cpf", Capability::Compliance),
    ("sdl", Capability::Compliance),
    ("contract", Capability::DocumentGeneration),
    ("offer letter", Capability::DocumentGeneration),
    ("talk to hr", Capability::EmployeeSupport),
    ("speak to hr", Capability::EmployeeSupport),
];

/// Keywords that mark a query as legal/complex
const COMPLEXITY_KEYWORDS: &[&str] = &[
    "act",
    "regulation",
    "statutory",
    "legal",
    "compliance",
    "ordinance",
    "section",
    "gazette",
];

/// Per-capability scoring patterns, in tie-break order: when two
/// capabilities score equally, the one declared first here wins.
static CAPABILITY_PATTERNS: LazyLock<Vec<(Capability, Vec<Regex>)>> = LazyLock::new(|| {
    fn compile(patterns: &[&str]) -> Vec<Regex> {
        patterns
            .iter()
            .map(|p| Regex::new(p).expect("classifier pattern must compile"))
            .collect()
    }

    vec![
        (
            Capability::PolicyResearch,
            compile(&[
                r"\bpolic(y|ies)\b",
                r"\b(employment|labou?r)\s+(law|act)\b",
                r"\bentitle(d|ment)\b",
                r"\bregulations?\b",
                r"\bhandbook\b",
            ]),
        ),
        (
            Capability::Compliance,
            compile(&[
                r"\b(contribution|deduction)s?\b",
                r"\bstatutory\b",
                r"\bcomplian(ce|t)\b",
                r"\b(pcb|lhdn|iras)\b",
                r"\bemployer\s+rate\b",
            ]),
        ),
        (
            Capability::SalaryCalculation,
            compile(&[
                r"\b(salary|wage|payroll)\b",
                r"\b(calculate|computation|compute)\b",
                r"\b(net|gross|take[- ]home)\s+pay\b",
                r"\b(bonus|allowance|increment)\b",
            ]),
        ),
        (
            Capability::LeaveManagement,
            compile(&[
                r"\b(annual|sick|maternity|paternity|unpaid)\s+leave\b",
                r"\bleave\s+(balance|application|entitlement)\b",
                r"\bdays?\s+off\b",
                r"\bmedical\s+certificate\b",
            ]),
        ),
        (
            Capability::TrainingManagement,
            compile(&[
                r"\btraining\b",
                r"\b(course|workshop|certification)s?\b",
                r"\bonboarding\s+modules?\b",
            ]),
        ),
        (
            Capability::OnboardingManagement,
            compile(&[
                r"\bonboard(ing)?\b",
                r"\bnew\s+(hire|joiner|employee)\b",
                r"\b(offer|appointment)\b",
                r"\b(probation|first\s+day|joining\s+date)\b",
            ]),
        ),
        (
            Capability::DocumentGeneration,
            compile(&[
                r"\b(document|letter|template)s?\b",
                r"\b(generate|draft|prepare)\b",
                r"\bagreement\b",
            ]),
        ),
        (
            Capability::EmployeeSupport,
            compile(&[
                r"\b(help|support|assist)\b",
                r"\b(how|where|who)\s+(do|can|should)\s+i\b",
                r"\b(complaint|grievance|issue)\b",
            ]),
        ),
        (
            Capability::MainHr,
            compile(&[r"\bhr\b", r"\bhuman\s+resources?\b"]),
        ),
    ]
});

/// Rule-based intent classifier.
///
/// Stateless and pure: identical input always yields an identical
/// [`Classification`].
#[derive(Debug, Default, Clone, Copy)]
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a free-text query into a capability and confidence.
    pub fn classify(&self, query: &str) -> Classification {
        let lower = query.to_lowercase();

        // 1. Priority overrides, in declaration order.
        for (keyword, capability) in PRIORITY_KEYWORDS {
            if lower.contains(keyword) {
                return Classification {
                    capability: *capability,
                    confidence: PRIORITY_CONFIDENCE,
                };
            }
        }

        // 2. Cumulative pattern scoring.
        let mut scores: Vec<(Capability, f64)> = CAPABILITY_PATTERNS
            .iter()
            .map(|(capability, patterns)| {
                let score = patterns.iter().filter(|p| p.is_match(&lower)).count() as f64;
                (*capability, score)
            })
            .collect();

        // 3. Complexity boost for legal-sounding queries.
        if complexity_hits(&lower) >= 2 {
            for (capability, score) in scores.iter_mut() {
                if matches!(
                    capability,
                    Capability::PolicyResearch | Capability::Compliance
                ) {
                    *score *= COMPLEXITY_BOOST;
                }
            }
        }

        // 4. Maximum selection; strictly-greater keeps the tie-break on
        //    the first-declared capability.
        let (winner, best_score) = scores
            .iter()
            .fold((Capability::EmployeeSupport, 0.0), |acc, &(cap, score)| {
                if score > acc.1 { (cap, score) } else { acc }
            });

        // 5. Fallback: weak winners and the generic HR front door both
        //    land on the helpdesk.
        if best_score < MIN_WINNING_SCORE || winner == Capability::MainHr {
            return Classification {
                capability: Capability::EmployeeSupport,
                confidence: FALLBACK_CONFIDENCE,
            };
        }

        // 6. Confidence normalization.
        Classification {
            capability: winner,
            confidence: (0.5 + best_score / 6.0).min(1.0),
        }
    }
}

/// Count complexity-keyword occurrences in an already-lowercased query.
fn complexity_hits(lower: &str) -> usize {
    lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| COMPLEXITY_KEYWORDS.contains(t))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(query: &str) -> Classification {
        IntentClassifier::new().classify(query)
    }

    // ==================== Priority overrides ====================

    #[test]
    fn test_priority_keyword_routes_to_compliance() {
        let c = classify("what is the epf employer rate for my staff");
        assert_eq!(c.capability, Capability::Compliance);
        assert_eq!(c.confidence, 0.95);
    }

    #[test]
    fn test_priority_keyword_wins_over_other_content() {
        // "training" patterns would otherwise score, but "epf" overrides
        let c = classify("epf deduction during training period");
        assert_eq!(c.capability, Capability::Compliance);
        assert_eq!(c.confidence, 0.95);
    }

    #[test]
    fn test_contract_routes_to_document_generation() {
        let c = classify("please send me my contract");
        assert_eq!(c.capability, Capability::DocumentGeneration);
        assert_eq!(c.confidence, 0.95);
    }

    #[test]
    fn test_talk_to_hr_routes_to_support() {
        let c = classify("I want to talk to hr now");
        assert_eq!(c.capability, Capability::EmployeeSupport);
        assert_eq!(c.confidence, 0.95);
    }

    // ==================== Fallback ====================

    #[test]
    fn test_empty_query_falls_back() {
        let c = classify("");
        assert_eq!(c.capability, Capability::EmployeeSupport);
        assert_eq!(c.confidence, 0.5);
    }

    #[test]
    fn test_unmatched_query_falls_back() {
        let c = classify("zzz qqq");
        assert_eq!(c.capability, Capability::EmployeeSupport);
        assert_eq!(c.confidence, 0.5);
    }

    #[test]
    fn test_main_hr_is_never_terminal() {
        // only MainHr patterns match, so the winner is remapped
        let c = classify("hr");
        assert_eq!(c.capability, Capability::EmployeeSupport);
        assert_eq!(c.confidence, 0.5);
    }

    // ==================== Scoring ====================

    #[test]
    fn test_leave_query_scores_leave_management() {
        let c = classify("how many days of annual leave do I get");
        assert_eq!(c.capability, Capability::LeaveManagement);
        assert!(c.confidence > 0.5);
    }

    #[test]
    fn test_salary_query_scores_salary_calculation() {
        let c = classify("calculate my net pay from gross salary");
        assert_eq!(c.capability, Capability::SalaryCalculation);
        assert!(c.confidence > 0.5);
    }

    #[test]
    fn test_complexity_boost_biases_policy() {
        // "employment act" + "section" + "statutory" reads legal; the
        // boost should push PolicyResearch past the generic matches
        let c = classify("under the employment act which section covers statutory leave policy");
        assert!(matches!(
            c.capability,
            Capability::PolicyResearch | Capability::Compliance
        ));
    }

    #[test]
    fn test_confidence_is_capped_at_one() {
        let c = classify(
            "calculate salary payroll computation bonus allowance gross pay net pay wage",
        );
        assert!(c.confidence <= 1.0);
    }

    // ==================== Purity ====================

    #[test]
    fn test_classify_is_deterministic() {
        let a = classify("training courses for new hire onboarding");
        let b = classify("training courses for new hire onboarding");
        assert_eq!(a, b);
    }
}
