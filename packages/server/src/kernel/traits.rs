// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// What to ask the model and how to read its answer lives in
// domains/certificates/extraction.
//
// Naming convention: Base* for trait names (e.g., BaseDocumentModel)

use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// Document Model Trait (Infrastructure - multimodal prompt-in/text-out)
// =============================================================================

/// Binary document sent alongside a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// IANA media type of `bytes` (e.g., "image/png", "application/pdf")
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

#[async_trait]
pub trait BaseDocumentModel: Send + Sync {
    /// Ask the model about a document (returns raw text response)
    ///
    /// The prompt is the first part of the request and the attachment the
    /// second. The response is untrusted free text.
    async fn generate(&self, prompt: &str, attachment: &Attachment) -> Result<String>;

    /// Name of the underlying model, for health and logging
    fn model_name(&self) -> &str;
}
