//! Workbook model errors

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the workbook model
#[derive(Debug, Error)]
pub enum Error {
    /// Text that is not an A1 address, or a column past `XFD`
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Row selection such as "1:x", "0" or "9:3"
    #[error("Invalid row range '{input}': {reason}")]
    InvalidRowSpan { input: String, reason: String },

    #[error("Row {0} is past the last sheet row ({1})")]
    RowOutOfBounds(u32, u32),

    #[error("Column {0} is past the last sheet column ({1})")]
    ColumnOutOfBounds(u16, u16),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Empty, too long, or containing `[]:*?/\`
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// Anything else, e.g. a file-format failure surfaced through the facade
    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
