//! Jurisdiction detection
//!
//! Agentix serves Malaysia and Singapore; the jurisdiction picks which
//! statutory rate tables and document sets apply.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported jurisdictions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jurisdiction {
    /// Malaysia (EPF, SOCSO, EIS)
    #[serde(rename = "MY")]
    My,
    /// Singapore (CPF, SDL)
    #[serde(rename = "SG")]
    Sg,
}

impl Jurisdiction {
    pub fn as_str(&self) -> &str {
        match self {
            Jurisdiction::My => "MY",
            Jurisdiction::Sg => "SG",
        }
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Jurisdiction {
    type Err = crate::core::error::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MY" | "MALAYSIA" => Ok(Jurisdiction::My),
            "SG" | "SINGAPORE" => Ok(Jurisdiction::Sg),
            other => Err(crate::core::error::DomainError::UnsupportedJurisdiction(
                other.to_string(),
            )),
        }
    }
}

/// Words that indicate a Malaysian context
const MY_INDICATORS: &[&str] = &[
    "malaysia",
    "malaysian",
    "epf",
    "kwsp",
    "socso",
    "perkeso",
    "eis",
    "pcb",
    "lhdn",
    "ringgit",
    "myr",
];

/// Words that indicate a Singaporean context
const SG_INDICATORS: &[&str] = &[
    "singapore",
    "singaporean",
    "cpf",
    "sdl",
    "iras",
    "mom",
    "sgd",
];

/// Detect the jurisdiction a query is about.
///
/// Counts indicator-word hits for each jurisdiction and returns the
/// one with the strictly larger count. A tie (including zero hits on
/// both sides) returns `None`: the caller must ask rather than guess.
pub fn detect_jurisdiction(query: &str) -> Option<Jurisdiction> {
    let lower = query.to_lowercase();
    let tokens: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();

    let my_hits = tokens.iter().filter(|t| MY_INDICATORS.contains(t)).count();
    let sg_hits = tokens.iter().filter(|t| SG_INDICATORS.contains(t)).count();

    match my_hits.cmp(&sg_hits) {
        std::cmp::Ordering::Greater => Some(Jurisdiction::My),
        std::cmp::Ordering::Less => Some(Jurisdiction::Sg),
        std::cmp::Ordering::Equal => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_malaysia() {
        assert_eq!(detect_jurisdiction("malaysia epf kwsp"), Some(Jurisdiction::My));
    }

    #[test]
    fn test_detect_singapore() {
        assert_eq!(detect_jurisdiction("singapore cpf"), Some(Jurisdiction::Sg));
    }

    #[test]
    fn test_no_indicators_is_unknown() {
        assert_eq!(detect_jurisdiction("hello"), None);
    }

    #[test]
    fn test_tie_is_unknown() {
        // one hit each side
        assert_eq!(detect_jurisdiction("epf vs cpf"), None);
    }

    #[test]
    fn test_indicators_match_whole_words_only() {
        // "moment" must not count as an SG "mom" hit
        assert_eq!(detect_jurisdiction("a moment please"), None);
    }

    #[test]
    fn test_from_str_accepts_full_names() {
        assert_eq!("malaysia".parse::<Jurisdiction>().unwrap(), Jurisdiction::My);
        assert_eq!("SG".parse::<Jurisdiction>().unwrap(), Jurisdiction::Sg);
        assert!("th".parse::<Jurisdiction>().is_err());
    }
}
