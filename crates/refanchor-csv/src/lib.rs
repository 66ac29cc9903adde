//! # refanchor-csv
//!
//! CSV reader and writer for refanchor.
//!
//! A CSV file is a workbook with a single sheet. Rows and columns map one to
//! one onto cells, so `C4` is the third field of the fourth line.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;
