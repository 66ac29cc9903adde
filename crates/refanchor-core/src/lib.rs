//! # refanchor-core
//!
//! Workbook data model shared by the refanchor crates.
//!
//! This crate provides the types the Workbook Store backends read into and
//! write out of:
//! - [`CellValue`] - Values held by a cell (numbers, strings, booleans, errors, formulas)
//! - [`CellAddress`] and [`CellRange`] - Cell coordinates and rectangular ranges
//! - [`RowSpan`] - A `start:end` row selection as typed by a user
//! - [`Workbook`], [`Worksheet`] - The document structures
//!
//! ## Example
//!
//! ```rust
//! use refanchor_core::{CellValue, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//!
//! sheet.set_cell_value("C1", "Only allow numeric inputs in F10").unwrap();
//! sheet.set_cell_formula("D1", "=ADDRESS(ROW(F10),COLUMN(F10))").unwrap();
//!
//! assert_eq!(sheet.cell_text("C1").unwrap().as_deref(), Some("Only allow numeric inputs in F10"));
//! assert!(matches!(sheet.get_value("D1").unwrap(), CellValue::Formula { .. }));
//! ```

pub mod cell;
pub mod error;
pub mod span;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{CellAddress, CellError, CellRange, CellValue};
pub use error::{Error, Result};
pub use span::RowSpan;
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
