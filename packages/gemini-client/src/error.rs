//! Error types for Gemini client.

use thiserror::Error;

/// Result type for Gemini client operations.
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Gemini client errors.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response, quota, invalid request)
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),

    /// The model answered without any text (blocked prompt, empty candidates)
    #[error("Empty response: {0}")]
    EmptyResponse(String),
}

impl GeminiError {
    /// Whether the failure came from the remote side rather than local setup.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            GeminiError::Network(_) | GeminiError::Api { .. } | GeminiError::EmptyResponse(_)
        )
    }
}
