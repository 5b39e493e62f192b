// Document model implementation using Gemini
//
// This is the infrastructure implementation of BaseDocumentModel.
// Business logic (what to prompt for) lives in domain layers.

use anyhow::{Context, Result};
use async_trait::async_trait;
use gemini_client::{Content, GeminiClient, GenerateContentRequest, GenerationConfig, Part};

use super::{Attachment, BaseDocumentModel};

/// Gemini implementation of the document model capability
#[derive(Debug, Clone)]
pub struct GeminiDocumentModel {
    client: GeminiClient,
    model: String,
    response_schema: Option<serde_json::Value>,
}

impl GeminiDocumentModel {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            response_schema: None,
        }
    }

    /// Ask for schema-constrained JSON instead of free text.
    ///
    /// Callers still scan the answer for the JSON object; the schema only
    /// makes a clean answer more likely.
    pub fn with_response_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    fn build_request(&self, prompt: &str, attachment: &Attachment) -> GenerateContentRequest {
        let request = GenerateContentRequest::new().content(Content::user(vec![
            Part::text(prompt),
            Part::inline_data(attachment.mime_type.clone(), &attachment.bytes),
        ]));

        match &self.response_schema {
            Some(schema) => request.generation_config(GenerationConfig::json(schema.clone())),
            None => request,
        }
    }
}

#[async_trait]
impl BaseDocumentModel for GeminiDocumentModel {
    async fn generate(&self, prompt: &str, attachment: &Attachment) -> Result<String> {
        let request = self.build_request(prompt, attachment);

        tracing::info!(
            model = %self.model,
            mime_type = %attachment.mime_type,
            bytes = attachment.bytes.len(),
            structured = self.response_schema.is_some(),
            "Calling Gemini for document extraction"
        );

        self.client
            .generate_text(&self.model, &request)
            .await
            .map_err(|e| {
                if e.is_remote() {
                    tracing::warn!(model = %self.model, error = %e, "Gemini call failed remotely");
                } else {
                    tracing::error!(model = %self.model, error = %e, "Gemini client failed locally");
                }
                e
            })
            .with_context(|| format!("Gemini generateContent failed for model {}", self.model))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
