//! Keyword-matched static knowledge base

use async_trait::async_trait;
use tracing::debug;

use agentix_application::{Citation, KnowledgeAnswer, KnowledgeBase, KnowledgeError};
use agentix_domain::Jurisdiction;

struct Topic {
    keywords: &'static [&'static str],
    my_answer: &'static str,
    my_source: (&'static str, &'static str),
    sg_answer: &'static str,
    sg_source: (&'static str, &'static str),
}

const TOPICS: &[Topic] = &[
    Topic {
        keywords: &["annual leave", "vacation", "leave entitlement"],
        my_answer: "Annual leave under the Employment Act 1955: 8 days for under \
                    2 years of service, 12 days for 2-5 years, 16 days thereafter.",
        my_source: ("Employment Act 1955 (Malaysia)", "s.60E"),
        sg_answer: "Annual leave under the Employment Act: 7 days in the first year \
                    of service, plus one day per further year up to 14 days.",
        sg_source: ("Employment Act 1968 (Singapore)", "s.88A"),
    },
    Topic {
        keywords: &["sick leave", "medical leave", "mc"],
        my_answer: "Paid sick leave: 14 days per year for under 2 years of service, \
                    18 days for 2-5 years, 22 days thereafter; 60 days where \
                    hospitalisation is necessary.",
        my_source: ("Employment Act 1955 (Malaysia)", "s.60F"),
        sg_answer: "Paid outpatient sick leave of up to 14 days per year and up to \
                    60 days including hospitalisation leave, after 6 months of service.",
        sg_source: ("Employment Act 1968 (Singapore)", "s.89"),
    },
    Topic {
        keywords: &["maternity", "pregnancy"],
        my_answer: "Maternity leave is 98 consecutive days with maternity allowance, \
                    subject to eligibility conditions.",
        my_source: ("Employment Act 1955 (Malaysia)", "s.37"),
        sg_answer: "Maternity leave is 16 weeks for qualifying mothers under the \
                    Child Development Co-Savings Act.",
        sg_source: ("Child Development Co-Savings Act 2001 (Singapore)", "s.9"),
    },
    Topic {
        keywords: &["working hours", "overtime", "work week"],
        my_answer: "Normal hours of work must not exceed 45 hours per week; overtime \
                    is payable at no less than 1.5 times the hourly rate.",
        my_source: ("Employment Act 1955 (Malaysia)", "s.60A"),
        sg_answer: "Contractual working hours are capped at 44 hours per week; \
                    overtime is payable at no less than 1.5 times the basic rate.",
        sg_source: ("Employment Act 1968 (Singapore)", "s.38"),
    },
    Topic {
        keywords: &["epf", "kwsp", "cpf", "retirement contribution"],
        my_answer: "EPF contributions are mandatory: 11% from the employee, 13% from \
                    the employer for monthly wages of RM5,000 and below (12% above).",
        my_source: ("EPF Act 1991 (Malaysia)", "Third Schedule"),
        sg_answer: "CPF contributions are mandatory for citizens and permanent \
                    residents, with age-banded rates up to 20% employee and 17% \
                    employer, on ordinary wages up to the monthly ceiling.",
        sg_source: ("CPF Act 1953 (Singapore)", "First Schedule"),
    },
    Topic {
        keywords: &["probation"],
        my_answer: "Probation terms are contractual; company policy caps probation at \
                    6 months with one permitted extension.",
        my_source: ("Company HR Policy", "Probation"),
        sg_answer: "Probation terms are contractual; company policy caps probation at \
                    6 months with one permitted extension.",
        sg_source: ("Company HR Policy", "Probation"),
    },
    Topic {
        keywords: &["termination", "notice period", "resignation"],
        my_answer: "Minimum notice is 4 weeks for under 2 years of service, 6 weeks \
                    for 2-5 years, 8 weeks thereafter, unless the contract provides more.",
        my_source: ("Employment Act 1955 (Malaysia)", "s.12"),
        sg_answer: "Minimum notice ranges from 1 day to 4 weeks depending on length \
                    of service, unless the contract provides more.",
        sg_source: ("Employment Act 1968 (Singapore)", "s.10"),
    },
];

/// In-process [`KnowledgeBase`] backed by a fixed topic table.
///
/// Stands in for the production retrieval pipeline. Matching is
/// first-keyword-wins over a lowercased prompt; unmatched prompts get
/// an honest "not covered" answer rather than an error.
#[derive(Default)]
pub struct StaticKnowledgeBase;

impl StaticKnowledgeBase {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl KnowledgeBase for StaticKnowledgeBase {
    async fn query(
        &self,
        prompt: &str,
        jurisdiction: Option<Jurisdiction>,
    ) -> Result<KnowledgeAnswer, KnowledgeError> {
        let lower = prompt.to_lowercase();
        let topic = TOPICS
            .iter()
            .find(|t| t.keywords.iter().any(|k| lower.contains(k)));

        let Some(topic) = topic else {
            debug!(prompt, "no knowledge topic matched");
            return Ok(KnowledgeAnswer {
                answer: "This question is not covered by the bundled policy corpus. \
                         Please contact the HR team directly."
                    .to_string(),
                citations: vec![],
            });
        };

        let answer = match jurisdiction {
            Some(Jurisdiction::My) => KnowledgeAnswer {
                answer: topic.my_answer.to_string(),
                citations: vec![citation(topic.my_source)],
            },
            Some(Jurisdiction::Sg) => KnowledgeAnswer {
                answer: topic.sg_answer.to_string(),
                citations: vec![citation(topic.sg_source)],
            },
            None => KnowledgeAnswer {
                answer: format!("Malaysia: {} Singapore: {}", topic.my_answer, topic.sg_answer),
                citations: vec![citation(topic.my_source), citation(topic.sg_source)],
            },
        };
        Ok(answer)
    }
}

fn citation((source, reference): (&str, &str)) -> Citation {
    Citation {
        source: source.to_string(),
        reference: reference.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_jurisdiction_selects_the_answer() {
        let kb = StaticKnowledgeBase::new();
        let answer = kb
            .query("how much annual leave do I get?", Some(Jurisdiction::Sg))
            .await
            .unwrap();
        assert!(answer.answer.contains("7 days"));
        assert_eq!(answer.citations[0].source, "Employment Act 1968 (Singapore)");
    }

    #[tokio::test]
    async fn test_no_jurisdiction_returns_both() {
        let kb = StaticKnowledgeBase::new();
        let answer = kb.query("maternity leave policy", None).await.unwrap();
        assert!(answer.answer.contains("Malaysia:"));
        assert_eq!(answer.citations.len(), 2);
    }

    #[tokio::test]
    async fn test_unmatched_prompt_is_not_an_error() {
        let kb = StaticKnowledgeBase::new();
        let answer = kb
            .query("what is the wifi password?", Some(Jurisdiction::My))
            .await
            .unwrap();
        assert!(answer.answer.contains("not covered"));
        assert!(answer.citations.is_empty());
    }
}
