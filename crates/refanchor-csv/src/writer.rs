//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};
use refanchor_core::{CellValue, Worksheet};

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a worksheet to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        worksheet: &Worksheet,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(worksheet, file, options)
    }

    /// Write the used range of a worksheet to a writer.
    ///
    /// Formula cells are written as their formula text.
    pub fn write<W: Write>(
        worksheet: &Worksheet,
        writer: W,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .from_writer(writer);

        // Rows and columns before the used range are kept so addresses survive
        if let Some(range) = worksheet.used_range() {
            for row in 0..=range.end.row {
                let record: Vec<String> = (0..=range.end.col)
                    .map(|col| match worksheet.value_ref(row, col) {
                        Some(CellValue::Formula { text, .. }) => text.clone(),
                        Some(value) => value.to_string(),
                        None => String::new(),
                    })
                    .collect();
                csv_writer.write_record(&record)?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CsvReadOptions, CsvReader};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_keeps_addresses() {
        let mut ws = Worksheet::new("Sheet1");
        ws.set_cell_value("C2", "Percentage: F12 = F11/F10").unwrap();
        ws.set_cell_formula("D2", r#"="For " & ADDRESS(ROW(F12),COLUMN(F12))"#)
            .unwrap();

        let mut out = Vec::new();
        CsvWriter::write(&ws, &mut out, &CsvWriteOptions::default()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            ",,,\n,,Percentage: F12 = F11/F10,\"=\"\"For \"\" & ADDRESS(ROW(F12),COLUMN(F12))\"\n"
        );

        let back = CsvReader::read(text.as_bytes(), &CsvReadOptions::default()).unwrap();
        assert_eq!(
            back.get_formula_at(1, 3),
            Some(r#"="For " & ADDRESS(ROW(F12),COLUMN(F12))"#)
        );
    }

    #[test]
    fn test_empty_sheet_writes_nothing() {
        let mut out = Vec::new();
        CsvWriter::write(&Worksheet::new("Empty"), &mut out, &CsvWriteOptions::default())
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_crlf() {
        let mut ws = Worksheet::new("Sheet1");
        ws.set_cell_value("A1", 1.5).unwrap();
        ws.set_cell_value("A2", true).unwrap();
        let options = CsvWriteOptions {
            line_terminator: LineTerminator::CRLF,
            ..Default::default()
        };
        let mut out = Vec::new();
        CsvWriter::write(&ws, &mut out, &options).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1.5\r\nTRUE\r\n");
    }
}
