//! Plain-text document generator writing to the local filesystem

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use agentix_application::{DocumentError, DocumentGenerator, DocumentRequest, GeneratedDocument};
use agentix_domain::Jurisdiction;

const SUPPORTED_TYPES: &[&str] = &["employment_contract", "offer_letter"];

/// Renders plain-text HR documents under a local output directory.
///
/// Stands in for the production contract renderer; the output is a
/// readable text file, one per document, named by document type and a
/// fresh id.
pub struct LocalDocumentGenerator {
    output_dir: PathBuf,
    company_name: String,
}

impl LocalDocumentGenerator {
    pub fn new(output_dir: impl Into<PathBuf>, company_name: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            company_name: company_name.into(),
        }
    }

    fn render(&self, request: &DocumentRequest) -> Result<String, DocumentError> {
        let governing_law = match request.jurisdiction {
            Jurisdiction::My => "Employment Act 1955 (Malaysia)",
            Jurisdiction::Sg => "Employment Act 1968 (Singapore)",
        };
        let date = Utc::now().format("%Y-%m-%d");

        match request.document_type.as_str() {
            "employment_contract" => Ok(format!(
                "EMPLOYMENT CONTRACT\n\
                 ===================\n\
                 Employer:      {company}\n\
                 Employee:      {name} ({id})\n\
                 Position:      {position}\n\
                 Monthly salary: {salary:.2}\n\
                 Governing law: {law}\n\
                 Date:          {date}\n",
                company = self.company_name,
                name = request.employee_name,
                id = request.employee_id,
                position = request.position,
                salary = request.salary,
                law = governing_law,
            )),
            "offer_letter" => Ok(format!(
                "OFFER OF EMPLOYMENT\n\
                 ===================\n\
                 Dear {name},\n\n\
                 {company} is pleased to offer you the position of\n\
                 {position} at a monthly salary of {salary:.2}.\n\n\
                 This offer is governed by the {law}.\n\
                 Date: {date}\n",
                name = request.employee_name,
                company = self.company_name,
                position = request.position,
                salary = request.salary,
                law = governing_law,
            )),
            other => Err(DocumentError::UnsupportedType(other.to_string())),
        }
    }
}

#[async_trait]
impl DocumentGenerator for LocalDocumentGenerator {
    async fn generate(&self, request: &DocumentRequest) -> Result<GeneratedDocument, DocumentError> {
        if !SUPPORTED_TYPES.contains(&request.document_type.as_str()) {
            return Err(DocumentError::UnsupportedType(request.document_type.clone()));
        }
        let body = self.render(request)?;

        let document_id = Uuid::new_v4().simple().to_string();
        let filename = format!("{}-{}.txt", request.document_type, &document_id[..8]);
        let path = self.output_dir.join(filename);

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| DocumentError::Storage(e.to_string()))?;
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| DocumentError::Storage(e.to_string()))?;

        info!(
            document_type = request.document_type.as_str(),
            path = %path.display(),
            "document generated"
        );
        Ok(GeneratedDocument {
            document_id,
            storage_path: path.to_string_lossy().into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn request(document_type: &str) -> DocumentRequest {
        DocumentRequest {
            document_type: document_type.to_string(),
            employee_name: "Aisha Rahman".to_string(),
            employee_id: "E-1001".to_string(),
            position: "Software Engineer".to_string(),
            salary: 4000.0,
            jurisdiction: Jurisdiction::My,
            extra: Map::new(),
        }
    }

    #[tokio::test]
    async fn test_generates_contract_file() {
        let dir = tempfile::tempdir().unwrap();
        let generator = LocalDocumentGenerator::new(dir.path(), "Agentix Sdn Bhd");

        let doc = generator.generate(&request("employment_contract")).await.unwrap();
        let body = std::fs::read_to_string(&doc.storage_path).unwrap();
        assert!(body.contains("EMPLOYMENT CONTRACT"));
        assert!(body.contains("Aisha Rahman"));
        assert!(body.contains("Employment Act 1955"));
    }

    #[tokio::test]
    async fn test_unknown_type_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let generator = LocalDocumentGenerator::new(dir.path(), "Agentix Sdn Bhd");

        let err = generator.generate(&request("severance_memo")).await.unwrap_err();
        assert!(matches!(err, DocumentError::UnsupportedType(_)));
    }
}
