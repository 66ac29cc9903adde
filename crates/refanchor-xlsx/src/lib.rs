//! # refanchor-xlsx
//!
//! XLSX (Office Open XML) reader and writer for refanchor.
//!
//! Only cell contents travel through this crate: strings, numbers, booleans,
//! error values and formulas (with their cached results). Styles, comments and
//! other sheet features are not read and are therefore not written back.

pub mod error;
pub mod reader;
pub mod writer;

mod escape;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
pub use writer::XlsxWriter;
