//! Document generation port
//!
//! The real contract/PDF renderer is an external collaborator; the
//! core only needs "given employee and contract parameters, give me a
//! document id and a storage path". Adapters live in infrastructure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use agentix_domain::Jurisdiction;

/// Errors that can occur while generating a document
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Render failed: {0}")]
    Render(String),

    #[error("Storage failed: {0}")]
    Storage(String),

    #[error("Unsupported document type: {0}")]
    UnsupportedType(String),
}

/// Parameters for one generated document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRequest {
    /// Document type key: "employment_contract", "offer_letter", ...
    pub document_type: String,
    pub employee_name: String,
    pub employee_id: String,
    pub position: String,
    pub salary: f64,
    pub jurisdiction: Jurisdiction,
    /// Free-form extras forwarded to the template
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

/// Handle to a generated document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedDocument {
    pub document_id: String,
    pub storage_path: String,
}

/// Port for rendering and storing HR documents
#[async_trait]
pub trait DocumentGenerator: Send + Sync {
    async fn generate(&self, request: &DocumentRequest) -> Result<GeneratedDocument, DocumentError>;
}
