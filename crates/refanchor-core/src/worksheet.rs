//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{CellAddress, CellRange, CellValue};
use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

/// A worksheet (single sheet in a workbook)
///
/// Cells are stored sparsely as `row -> col -> value`, so iteration is always
/// row-major, which is the order the XLSX and CSV writers need.
#[derive(Debug, Clone)]
pub struct Worksheet {
    name: String,
    rows: BTreeMap<u32, BTreeMap<u16, CellValue>>,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            rows: BTreeMap::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    // === Cell Access ===

    /// Get cell value by address string (e.g., "C4")
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_value_at(addr.row, addr.col))
    }

    /// Get cell value by indices
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.value_ref(row, col).cloned().unwrap_or_default()
    }

    /// Borrow the value of a non-empty cell
    pub fn value_ref(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Text shown in a cell, by address string
    pub fn cell_text(&self, address: &str) -> Result<Option<String>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cell_text_at(addr.row, addr.col))
    }

    /// Text shown in a cell (see [`CellValue::display_text`])
    pub fn cell_text_at(&self, row: u32, col: u16) -> Option<String> {
        self.value_ref(row, col).and_then(CellValue::display_text)
    }

    /// Get the formula text at a cell position (if it's a formula)
    pub fn get_formula_at(&self, row: u32, col: u16) -> Option<&str> {
        self.value_ref(row, col).and_then(CellValue::formula_text)
    }

    // === Cell Modification ===

    /// Set a cell value by address string
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by row and column indices.
    ///
    /// Setting [`CellValue::Empty`] removes the cell.
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        self.validate_cell_position(row, col)?;
        let value = value.into();

        if value.is_empty() {
            if let Some(cols) = self.rows.get_mut(&row) {
                cols.remove(&col);
                if cols.is_empty() {
                    self.rows.remove(&row);
                }
            }
        } else {
            self.rows.entry(row).or_default().insert(col, value);
        }
        Ok(())
    }

    /// Set a cell formula by address string
    pub fn set_cell_formula(&mut self, address: &str, formula: &str) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_formula_at(addr.row, addr.col, formula)
    }

    /// Set a cell formula by indices, replacing whatever the cell held
    pub fn set_cell_formula_at(&mut self, row: u32, col: u16, formula: &str) -> Result<()> {
        if formula.trim().is_empty() {
            return Err(Error::other("formula text is empty"));
        }
        self.set_cell_value_at(row, col, CellValue::formula(formula))
    }

    // === Iteration ===

    /// Iterate non-empty cells in row-major order: (row, col, value)
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &CellValue)> {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, value)| (row, col, value)))
    }

    /// Iterate all formula cells: (row, col, formula_text)
    pub fn formula_cells(&self) -> impl Iterator<Item = (u32, u16, &str)> {
        self.iter_cells()
            .filter_map(|(row, col, value)| value.formula_text().map(|f| (row, col, f)))
    }

    /// Number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    /// Smallest range containing every non-empty cell
    pub fn used_range(&self) -> Option<CellRange> {
        let first_row = *self.rows.keys().next()?;
        let last_row = *self.rows.keys().next_back()?;
        let min_col = self.rows.values().filter_map(|c| c.keys().next()).min()?;
        let max_col = self.rows.values().filter_map(|c| c.keys().next_back()).max()?;
        Some(CellRange::from_indices(first_row, *min_col, last_row, *max_col))
    }

    fn validate_cell_position(&self, row: u32, col: u16) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_and_get() {
        let mut sheet = Worksheet::new("Inputs");
        sheet.set_cell_value("C3", "Only allow numeric inputs: F10").unwrap();
        sheet.set_cell_value("B2", 12.0).unwrap();

        assert_eq!(sheet.name(), "Inputs");
        assert_eq!(
            sheet.get_value("C3").unwrap().as_string(),
            Some("Only allow numeric inputs: F10")
        );
        assert_eq!(sheet.cell_text("B2").unwrap().as_deref(), Some("12"));
        assert_eq!(sheet.cell_text("Z9").unwrap(), None);
        assert_eq!(sheet.cell_count(), 2);
    }

    #[test]
    fn test_empty_value_removes_cell() {
        let mut sheet = Worksheet::new("Sheet1");
        sheet.set_cell_value("A1", "x").unwrap();
        sheet.set_cell_value("A1", CellValue::Empty).unwrap();
        assert_eq!(sheet.cell_count(), 0);
        assert!(sheet.used_range().is_none());
    }

    #[test]
    fn test_formula_cells_and_used_range() {
        let mut sheet = Worksheet::new("Sheet1");
        sheet.set_cell_value("B4", "note").unwrap();
        sheet.set_cell_formula("D2", "ADDRESS(ROW(F10),COLUMN(F10))").unwrap();

        let formulas: Vec<_> = sheet.formula_cells().collect();
        assert_eq!(formulas, vec![(1, 3, "=ADDRESS(ROW(F10),COLUMN(F10))")]);
        assert_eq!(sheet.used_range().unwrap().to_string(), "B2:D4");
        assert!(sheet.set_cell_formula("A1", "  ").is_err());
    }

    #[test]
    fn test_out_of_bounds() {
        let mut sheet = Worksheet::new("Sheet1");
        assert!(sheet.set_cell_value_at(MAX_ROWS, 0, 1.0).is_err());
        assert!(sheet.set_cell_value_at(0, MAX_COLS, 1.0).is_err());
    }
}
