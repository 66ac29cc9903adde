//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;
use refanchor_core::{CellValue, Worksheet, MAX_COLS, MAX_ROWS, MAX_SHEET_NAME_LEN};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a worksheet.
    ///
    /// Unless the options name the sheet, it is named after the file stem.
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut worksheet = Self::read(file, options)?;
        if options.sheet_name.is_none() {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                worksheet.set_name(sheet_name_from_stem(stem));
            }
        }
        log::debug!(
            "read {} cells from {} into sheet '{}'",
            worksheet.cell_count(),
            path.display(),
            worksheet.name()
        );
        Ok(worksheet)
    }

    /// Read CSV from a reader into a worksheet
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let name = options.sheet_name.as_deref().unwrap_or("Sheet1");
        let mut worksheet = Worksheet::new(name);

        for (record_idx, result) in csv_reader.records().enumerate() {
            let record = result?;
            let row = u32::try_from(record_idx)
                .ok()
                .filter(|r| *r < MAX_ROWS)
                .ok_or_else(|| CsvError::TooLarge {
                    record: record_idx + 1,
                    message: format!("more than {} rows", MAX_ROWS),
                })?;

            for (col_idx, field) in record.iter().enumerate() {
                let col = u16::try_from(col_idx)
                    .ok()
                    .filter(|c| *c < MAX_COLS)
                    .ok_or_else(|| CsvError::TooLarge {
                        record: record_idx + 1,
                        message: format!("more than {} fields", MAX_COLS),
                    })?;
                worksheet.set_cell_value_at(row, col, Self::field_value(field, options))?;
            }
        }

        Ok(worksheet)
    }

    /// Interpret one field
    fn field_value(field: &str, options: &CsvReadOptions) -> CellValue {
        if field.trim().is_empty() {
            return CellValue::Empty;
        }

        if options.detect_formulas && field.starts_with('=') && field.len() > 1 {
            return CellValue::formula(field);
        }

        if options.detect_numbers {
            if let Ok(n) = field.trim().parse::<f64>() {
                if n.is_finite() {
                    return CellValue::Number(n);
                }
            }
        }

        CellValue::string(field)
    }
}

/// Turn a file stem into a usable sheet name
fn sheet_name_from_stem(stem: &str) -> String {
    const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
    let name: String = stem
        .chars()
        .map(|c| if INVALID_CHARS.contains(&c) { '_' } else { c })
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    if name.trim().is_empty() {
        "Sheet1".to_string()
    } else {
        name
    }
}
