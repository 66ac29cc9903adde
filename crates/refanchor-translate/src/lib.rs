//! # refanchor-translate
//!
//! Turns free-text spreadsheet instructions that mention cells ("only allow
//! numeric inputs: F10; G10") into formulas whose references follow the cells
//! when rows or columns are inserted or deleted.
//!
//! The pipeline for one instruction is:
//! 1. [`extract`] the cell references
//! 2. [`classify`] the instruction into an [`Archetype`]
//! 3. [`parse_ratios`] for percentage instructions
//! 4. build the formula with a [`FormulaStrategy`]
//!
//! [`BatchDriver`] runs the pipeline over many instructions and the functions
//! in [`batch`] connect it to a [`WorkbookStore`].
//!
//! ## Example
//!
//! ```rust
//! use refanchor_translate::{BatchDriver, Instruction, TemplateStrategy};
//! use refanchor_core::CellAddress;
//!
//! let mut driver = BatchDriver::new(TemplateStrategy);
//! let results = driver.process_all(vec![Instruction::new(
//!     "Sheet1",
//!     CellAddress::parse("C2").unwrap(),
//!     "Percentage: F12 = F11/F10",
//! )]);
//!
//! assert_eq!(
//!     results[0].formula,
//!     "=\"For \" & ADDRESS(ROW(F12),COLUMN(F12)) & \" = \" & ADDRESS(ROW(F11),COLUMN(F11)) & \"/\" & ADDRESS(ROW(F10),COLUMN(F10))"
//! );
//! ```

pub mod analysis;
pub mod batch;
pub mod classify;
pub mod error;
pub mod export;
pub mod ratio;
pub mod reference;
pub mod store;
pub mod strategy;
pub mod synthesize;

pub use analysis::{analyze, Analysis};
pub use batch::{
    process_range, read_instructions, try_process_range, write_formulas, BatchDriver,
    Instruction, InstructionResult,
};
pub use classify::{classify, Archetype, Flavor};
pub use error::{Result, TranslateError};
pub use export::{export_table, EXPORT_COLUMNS, EXPORT_SHEET_NAME, NO_REFERENCES};
pub use ratio::{parse_ratios, CalculationTriple, MAX_RATIO_TRIPLES};
pub use reference::{extract, CellRef, ReferenceSet};
pub use store::WorkbookStore;
pub use strategy::{
    concatenate_echo, error_marker, BatchOptions, DraftingStrategy, FormulaDrafter,
    FormulaStrategy, TemplateStrategy,
};
pub use synthesize::{
    ensure_formula_prefix, indirection, literal_echo, quote_literal, synthesize,
    MAX_LISTED_REFS, MAX_PREFIX_CHARS, MAX_VALIDATION_REFS,
};
