//! Batch driver and the workbook-facing operations

use serde::{Serialize, Serializer};

use refanchor_core::{CellAddress, CellRange, RowSpan};

use crate::analysis::analyze;
use crate::classify::Archetype;
use crate::error::{Result, TranslateError};
use crate::reference::ReferenceSet;
use crate::store::WorkbookStore;
use crate::strategy::FormulaStrategy;

/// Instruction text read from one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub sheet: String,
    pub address: CellAddress,
    pub text: String,
}

impl Instruction {
    pub fn new<S: Into<String>, T: Into<String>>(sheet: S, address: CellAddress, text: T) -> Self {
        Self {
            sheet: sheet.into(),
            address,
            text: text.into(),
        }
    }
}

/// Outcome for one non-empty instruction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstructionResult {
    pub sheet: String,
    #[serde(serialize_with = "serialize_address")]
    pub address: CellAddress,
    pub instruction: String,
    pub references: ReferenceSet,
    pub archetype: Archetype,
    pub formula: String,
}

fn serialize_address<S: Serializer>(
    address: &CellAddress,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(address)
}

/// Runs one strategy over a list of instructions
pub struct BatchDriver<S> {
    strategy: S,
}

impl<S: FormulaStrategy> BatchDriver<S> {
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Translate one instruction, or `None` if its text is blank
    pub fn process(&mut self, instruction: Instruction) -> Option<InstructionResult> {
        if instruction.text.trim().is_empty() {
            return None;
        }

        let analysis = analyze(&instruction.text);
        log::debug!(
            "{}!{}: {} reference(s), {}",
            instruction.sheet,
            instruction.address,
            analysis.references.len(),
            analysis.archetype
        );
        let formula = self.strategy.formula(&analysis);

        Some(InstructionResult {
            sheet: instruction.sheet,
            address: instruction.address,
            instruction: instruction.text,
            references: analysis.references,
            archetype: analysis.archetype,
            formula,
        })
    }

    /// Translate every non-blank instruction, in input order
    pub fn process_all<I>(&mut self, instructions: I) -> Vec<InstructionResult>
    where
        I: IntoIterator<Item = Instruction>,
    {
        let results: Vec<InstructionResult> = instructions
            .into_iter()
            .filter_map(|instruction| self.process(instruction))
            .collect();
        log::info!(
            "{} strategy produced {} formula(s)",
            self.strategy.name(),
            results.len()
        );
        results
    }
}

/// Read the instruction column over `rows`.
///
/// Empty cells are skipped; numbers and other values are read as the text
/// they display.
pub fn read_instructions<W: WorkbookStore + ?Sized>(
    store: &W,
    sheet: &str,
    column: &str,
    rows: RowSpan,
) -> Result<Vec<Instruction>> {
    if !store.has_sheet(sheet) {
        return Err(TranslateError::SheetNotFound(sheet.to_string()));
    }

    let range = CellRange::column_span(column, rows)?;
    let mut instructions = Vec::new();
    for addr in range.cells() {
        if let Some(text) = store.read_text(sheet, addr)? {
            instructions.push(Instruction::new(sheet, addr, text));
        }
    }
    Ok(instructions)
}

/// Parse `range_spec` (`"1:10"` or `"7"`), read the instructions and run the
/// strategy over them.
///
/// A malformed range or a missing sheet is logged and yields no results.
pub fn process_range<W, S>(
    store: &W,
    sheet: &str,
    column: &str,
    range_spec: &str,
    driver: &mut BatchDriver<S>,
) -> Vec<InstructionResult>
where
    W: WorkbookStore + ?Sized,
    S: FormulaStrategy,
{
    match try_process_range(store, sheet, column, range_spec, driver) {
        Ok(results) => results,
        Err(e) => {
            log::error!("Error processing instruction range: {}", e);
            Vec::new()
        }
    }
}

/// Like [`process_range`] but reports why nothing could be processed
pub fn try_process_range<W, S>(
    store: &W,
    sheet: &str,
    column: &str,
    range_spec: &str,
    driver: &mut BatchDriver<S>,
) -> Result<Vec<InstructionResult>>
where
    W: WorkbookStore + ?Sized,
    S: FormulaStrategy,
{
    let rows = RowSpan::parse(range_spec).map_err(TranslateError::InvalidRowSpan)?;
    let instructions = read_instructions(store, sheet, column, rows)?;
    log::info!(
        "processing {} instruction cell(s) in column {} rows {} of '{}'",
        instructions.len(),
        column.to_ascii_uppercase(),
        rows,
        sheet
    );
    Ok(driver.process_all(instructions))
}

/// Write each formula into `target_column` of `sheet`, on the row its
/// instruction came from. Returns the number of formulas written.
pub fn write_formulas<W: WorkbookStore + ?Sized>(
    store: &mut W,
    sheet: &str,
    target_column: &str,
    results: &[InstructionResult],
) -> Result<usize> {
    if !store.has_sheet(sheet) {
        return Err(TranslateError::SheetNotFound(sheet.to_string()));
    }

    let col = CellAddress::letters_to_column(target_column.trim())?;
    for result in results {
        let target = CellAddress::new(result.address.row, col);
        store.write_formula(sheet, target, &result.formula)?;
        log::debug!("added formula to {}!{}", sheet, target);
    }
    Ok(results.len())
}
