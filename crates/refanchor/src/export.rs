//! Saving batch results

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use refanchor_core::{Error, Result, Workbook};
use refanchor_csv::{CsvWriteOptions, CsvWriter};
use refanchor_translate::{export_table, InstructionResult};
use refanchor_xlsx::XlsxWriter;

use crate::extension;

/// Save results by extension: `.xlsx` (a `Generated_Formulas` sheet), `.csv`
/// (the same table) or `.json` (an array of result objects)
pub fn save_results<P: AsRef<Path>>(results: &[InstructionResult], path: P) -> Result<()> {
    let path = path.as_ref();
    match extension(path).as_deref() {
        Some("xlsx") => {
            let mut workbook = Workbook::empty();
            workbook.add_existing_worksheet(table(results)?)?;
            XlsxWriter::write_file(&workbook, path).map_err(|e| Error::other(e.to_string()))?;
        }
        Some("csv") => {
            CsvWriter::write_file(&table(results)?, path, &CsvWriteOptions::default())
                .map_err(|e| Error::other(e.to_string()))?;
        }
        Some("json") => {
            let file = File::create(path).map_err(|e| Error::other(e.to_string()))?;
            serde_json::to_writer_pretty(BufWriter::new(file), results)
                .map_err(|e| Error::other(e.to_string()))?;
        }
        _ => {
            return Err(Error::other(format!(
                "Unsupported export format: {}",
                path.display()
            )))
        }
    }
    log::info!("saved {} result(s) to {}", results.len(), path.display());
    Ok(())
}

fn table(results: &[InstructionResult]) -> Result<refanchor_core::Worksheet> {
    export_table(results).map_err(|e| Error::other(e.to_string()))
}

/// `<stem>_Generated_Formulas.xlsx` in the current directory
pub fn default_export_path<P: AsRef<Path>>(workbook: P) -> PathBuf {
    PathBuf::from(format!("{}_Generated_Formulas.xlsx", stem(workbook.as_ref())))
}

/// `<stem>_with_formulas.xlsx` next to the workbook
pub fn default_copy_path<P: AsRef<Path>>(workbook: P) -> PathBuf {
    let workbook = workbook.as_ref();
    workbook.with_file_name(format!("{}_with_formulas.xlsx", stem(workbook)))
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "workbook".to_string())
}
