//! Language-model error types

use thiserror::Error;

/// Result type for language-model calls
pub type LlmResult<T> = std::result::Result<T, LlmError>;

/// Errors from the language-model collaborator
#[derive(Debug, Error)]
pub enum LlmError {
    /// No API key in the configuration or environment
    #[error("API key not configured (set REFANCHOR_OPENAI_KEY or OPENAI_API_KEY)")]
    MissingKey,

    /// Transport failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Body was not the expected JSON
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Well-formed but unusable answer
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
