//! Translation error types

use thiserror::Error;

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslateError>;

/// Errors raised while translating instructions
#[derive(Debug, Error)]
pub enum TranslateError {
    /// A token that looked like a cell address but is not one
    #[error("Invalid cell reference '{token}': {reason}")]
    InvalidReference { token: String, reason: String },

    /// Malformed `start:end` row selection
    #[error(transparent)]
    InvalidRowSpan(refanchor_core::Error),

    /// Sheet absent from the workbook
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// A template needs references but the instruction has none
    #[error("{archetype} instruction has no cell references")]
    MissingReferences { archetype: &'static str },

    /// Workbook access error
    #[error(transparent)]
    Workbook(#[from] refanchor_core::Error),
}

impl TranslateError {
    pub(crate) fn invalid_reference(token: &str, reason: impl Into<String>) -> Self {
        TranslateError::InvalidReference {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}
