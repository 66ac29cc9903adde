//! Errors raised while reading or writing CSV files

use thiserror::Error;

pub type CsvResult<T> = std::result::Result<T, CsvError>;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("I/O failure on CSV file: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed quoting, or a write the csv crate rejected
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// More rows or fields than a sheet holds
    #[error("Record {record} does not fit on a sheet: {message}")]
    TooLarge { record: usize, message: String },

    #[error(transparent)]
    Core(#[from] refanchor_core::Error),
}
