//! Tabular export of batch results

use refanchor_core::{CellValue, Worksheet};

use crate::batch::InstructionResult;
use crate::error::Result;

/// Name of the exported sheet
pub const EXPORT_SHEET_NAME: &str = "Generated_Formulas";

/// Header row of the exported sheet
pub const EXPORT_COLUMNS: [&str; 5] = [
    "sheet_name",
    "instruction_cell",
    "original_instruction",
    "extracted_cell_refs",
    "dynamic_formula",
];

/// Shown in place of an empty reference list
pub const NO_REFERENCES: &str = "No cell references found";

/// One row per result under a header row.
///
/// Formulas are stored as text so the sheet shows their source.
pub fn export_table(results: &[InstructionResult]) -> Result<Worksheet> {
    let mut sheet = Worksheet::new(EXPORT_SHEET_NAME);

    for (col, header) in EXPORT_COLUMNS.iter().enumerate() {
        sheet.set_cell_value_at(0, col as u16, *header)?;
    }

    for (i, result) in results.iter().enumerate() {
        let row = u32::try_from(i + 1)
            .map_err(|_| refanchor_core::Error::other("too many results for one sheet"))?;
        let references = if result.references.is_empty() {
            NO_REFERENCES.to_string()
        } else {
            result.references.render()
        };

        let values = [
            result.sheet.clone(),
            result.address.to_string(),
            result.instruction.clone(),
            references,
            result.formula.clone(),
        ];
        for (col, value) in values.into_iter().enumerate() {
            sheet.set_cell_value_at(row, col as u16, CellValue::String(value))?;
        }
    }

    Ok(sheet)
}
