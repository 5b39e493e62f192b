// Mock implementations for testing
//
// Provides scripted services that can be injected into ServerDeps for tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use super::{Attachment, BaseDocumentModel};

// =============================================================================
// Mock Document Model
// =============================================================================

/// Arguments captured from a generate call
#[derive(Debug, Clone)]
pub struct GenerateCallArgs {
    pub prompt: String,
    pub mime_type: String,
    pub byte_len: usize,
}

/// Scripted document model.
///
/// Queued responses are returned in order; once the queue is empty the
/// default response is used.
pub struct MockDocumentModel {
    responses: Mutex<VecDeque<Result<String, String>>>,
    default_response: String,
    calls: Mutex<Vec<GenerateCallArgs>>,
}

impl Default for MockDocumentModel {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockDocumentModel {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            default_response: "{}".to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Model that always answers with `text`
    pub fn answering(text: &str) -> Self {
        Self {
            default_response: text.to_string(),
            ..Self::new()
        }
    }

    /// Queue a text response
    pub fn with_response(self, text: &str) -> Self {
        lock(&self.responses).push_back(Ok(text.to_string()));
        self
    }

    /// Queue a failure (network error, quota, ...)
    pub fn with_failure(self, message: &str) -> Self {
        lock(&self.responses).push_back(Err(message.to_string()));
        self
    }

    /// Get all calls made so far
    pub fn calls(&self) -> Vec<GenerateCallArgs> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

#[async_trait]
impl BaseDocumentModel for MockDocumentModel {
    async fn generate(&self, prompt: &str, attachment: &Attachment) -> Result<String> {
        lock(&self.calls).push(GenerateCallArgs {
            prompt: prompt.to_string(),
            mime_type: attachment.mime_type.clone(),
            byte_len: attachment.bytes.len(),
        });

        match lock(&self.responses).pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Ok(self.default_response.clone()),
        }
    }

    fn model_name(&self) -> &str {
        "mock-document-model"
    }
}
