//! Workbook access used by the batch operations

use refanchor_core::{CellAddress, Workbook};

/// Reads instruction text from, and writes formulas to, a workbook
pub trait WorkbookStore {
    /// Whether the workbook has a sheet with this name
    fn has_sheet(&self, sheet: &str) -> bool;

    /// Text shown in a cell, `None` if the cell is empty.
    ///
    /// Errors only for a missing sheet.
    fn read_text(&self, sheet: &str, addr: CellAddress) -> refanchor_core::Result<Option<String>>;

    /// Replace the cell's content with a formula
    fn write_formula(
        &mut self,
        sheet: &str,
        addr: CellAddress,
        formula: &str,
    ) -> refanchor_core::Result<()>;
}

impl WorkbookStore for Workbook {
    fn has_sheet(&self, sheet: &str) -> bool {
        self.worksheet_by_name(sheet).is_some()
    }

    fn read_text(&self, sheet: &str, addr: CellAddress) -> refanchor_core::Result<Option<String>> {
        let ws = self.require_worksheet(sheet)?;
        Ok(ws.cell_text_at(addr.row, addr.col))
    }

    fn write_formula(
        &mut self,
        sheet: &str,
        addr: CellAddress,
        formula: &str,
    ) -> refanchor_core::Result<()> {
        let ws = self
            .worksheet_by_name_mut(sheet)
            .ok_or_else(|| refanchor_core::Error::SheetNotFound(sheet.to_string()))?;
        ws.set_cell_formula_at(addr.row, addr.col, formula)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refanchor_core::Error;

    #[test]
    fn test_workbook_store() {
        let mut wb = Workbook::new();
        wb.worksheet_mut(0)
            .unwrap()
            .set_cell_value("C2", "See F10")
            .unwrap();

        let c2 = CellAddress::parse("C2").unwrap();
        let d2 = CellAddress::parse("D2").unwrap();
        assert!(wb.has_sheet("Sheet1"));
        assert!(!wb.has_sheet("Other"));
        assert_eq!(wb.read_text("Sheet1", c2).unwrap().as_deref(), Some("See F10"));
        assert_eq!(wb.read_text("Sheet1", d2).unwrap(), None);
        assert!(matches!(
            wb.read_text("Other", c2),
            Err(Error::SheetNotFound(_))
        ));

        wb.write_formula("Sheet1", d2, "=ADDRESS(ROW(F10),COLUMN(F10))")
            .unwrap();
        assert_eq!(
            wb.worksheet(0).unwrap().get_formula_at(1, 3),
            Some("=ADDRESS(ROW(F10),COLUMN(F10))")
        );
        assert!(wb.write_formula("Other", d2, "=1").is_err());
    }
}
