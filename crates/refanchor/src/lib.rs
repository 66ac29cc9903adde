//! # refanchor
//!
//! Turns free-text instructions kept in spreadsheet cells ("The following
//! cells should only allow numeric inputs: F10; G10") into formulas such as
//! `="... " & ADDRESS(ROW(F10),COLUMN(F10)) & ...` that keep naming the same
//! cells after rows or columns are inserted or deleted.
//!
//! ## Features
//!
//! - Read and write XLSX workbooks, and CSV files as one-sheet workbooks
//! - Deterministic template formulas, or formulas drafted by a language model
//!   (`llm` feature, on by default)
//! - Export of the results as XLSX, CSV or JSON
//!
//! ## Example
//!
//! ```rust
//! use refanchor::prelude::*;
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//! sheet.set_cell_value("C2", "Only allow numeric inputs: F10; G10").unwrap();
//!
//! let mut driver = BatchDriver::new(TemplateStrategy);
//! let results = process_range(&workbook, "Sheet1", "C", "1:10", &mut driver);
//! write_formulas(&mut workbook, "Sheet1", "D", &results).unwrap();
//!
//! let formula = workbook.worksheet(0).unwrap().get_formula_at(1, 3).unwrap();
//! assert!(formula.contains("ADDRESS(ROW(F10),COLUMN(F10))"));
//! // workbook.save("checklist_with_formulas.xlsx").unwrap();
//! ```

pub mod export;
pub mod prelude;

pub use export::{default_export_path, default_copy_path, save_results};

// Re-export core types
pub use refanchor_core::{
    CellAddress, CellError, CellRange, CellValue, Error, Result, RowSpan, Workbook, Worksheet,
    MAX_COLS, MAX_ROWS, MAX_SHEET_NAME_LEN,
};

// Re-export the translation engine
pub use refanchor_translate::{
    analyze, classify, export_table, extract, parse_ratios, process_range, read_instructions,
    synthesize, try_process_range, write_formulas, Analysis, Archetype, BatchDriver,
    BatchOptions, CalculationTriple, CellRef, DraftingStrategy, Flavor, FormulaDrafter,
    FormulaStrategy, Instruction, InstructionResult, ReferenceSet, TemplateStrategy,
    TranslateError, WorkbookStore, EXPORT_SHEET_NAME,
};

#[cfg(feature = "llm")]
pub use refanchor_llm::{LlmClient, LlmConfig, LlmDrafter, LlmError};

// Re-export I/O types
pub use refanchor_csv::{CsvError, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};
pub use refanchor_xlsx::{XlsxError, XlsxReader, XlsxWriter};

use std::path::Path;

/// Extension trait for Workbook to add file I/O
pub trait WorkbookExt {
    /// Open a workbook from a file (`.xlsx`, `.xlsm` or `.csv`)
    fn open<P: AsRef<Path>>(path: P) -> Result<Workbook>;

    /// Save the workbook to a file (`.xlsx`, or `.csv` for the first sheet)
    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>;
}

impl WorkbookExt for Workbook {
    fn open<P: AsRef<Path>>(path: P) -> Result<Workbook> {
        let path = path.as_ref();
        match extension(path).as_deref() {
            Some("xlsx") | Some("xlsm") => {
                XlsxReader::read_file(path).map_err(|e| Error::other(e.to_string()))
            }
            Some("csv") => {
                let worksheet = CsvReader::read_file(path, &CsvReadOptions::default())
                    .map_err(|e| Error::other(e.to_string()))?;

                let mut workbook = Workbook::empty();
                workbook.add_existing_worksheet(worksheet)?;
                Ok(workbook)
            }
            _ => Err(Error::other(format!(
                "Unsupported file format: {}",
                path.display()
            ))),
        }
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        match extension(path).as_deref() {
            Some("xlsx") => {
                XlsxWriter::write_file(self, path).map_err(|e| Error::other(e.to_string()))
            }
            Some("csv") => {
                if let Some(sheet) = self.worksheet(0) {
                    CsvWriter::write_file(sheet, path, &CsvWriteOptions::default())
                        .map_err(|e| Error::other(e.to_string()))
                } else {
                    Err(Error::other("No worksheets to save"))
                }
            }
            _ => Err(Error::other(format!(
                "Unsupported file format: {}",
                path.display()
            ))),
        }
    }
}

/// Lower-cased file extension
pub(crate) fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}
