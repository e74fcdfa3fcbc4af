//! Knowledge base port
//!
//! Narrow interface over the document-retrieval engine that answers
//! free-text policy questions. The production adapter wraps a RAG
//! pipeline; tests and the CLI use a static keyword-matched stand-in.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use agentix_domain::Jurisdiction;

/// Errors that can occur during a knowledge query
#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("Knowledge base unavailable: {0}")]
    Unavailable(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

/// A source backing part of an answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Citation {
    /// Document or corpus the passage came from
    pub source: String,
    /// Section, clause, or page reference within the source
    pub reference: String,
}

/// Answer to a free-text policy question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeAnswer {
    pub answer: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<Citation>,
}

/// Port for querying the HR knowledge corpus
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    async fn query(
        &self,
        prompt: &str,
        jurisdiction: Option<Jurisdiction>,
    ) -> Result<KnowledgeAnswer, KnowledgeError>;
}
