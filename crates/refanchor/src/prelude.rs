//! Prelude module - common imports for refanchor users
//!
//! ```rust
//! use refanchor::prelude::*;
//! ```

pub use crate::{
    // Workbook types
    CellAddress,
    CellValue,
    Error,
    Result,
    RowSpan,
    Workbook,
    // Extension traits
    WorkbookExt,
    Worksheet,

    // Translation
    analyze,
    extract,
    process_range,
    save_results,
    write_formulas,
    Archetype,
    BatchDriver,
    BatchOptions,
    DraftingStrategy,
    FormulaStrategy,
    Instruction,
    InstructionResult,
    TemplateStrategy,

    // I/O types
    CsvReader,
    CsvWriter,
    XlsxReader,
    XlsxWriter,
};
