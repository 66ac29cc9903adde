//! Errors raised while reading or writing a workbook package

use thiserror::Error;

pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

#[derive(Debug, Error)]
pub enum XlsxError {
    #[error("I/O failure on workbook file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a zip archive, or an entry could not be read
    #[error("Not a readable xlsx package: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Malformed XML in workbook part: {0}")]
    Xml(#[from] quick_xml::Error),

    /// A zip archive that is not a spreadsheet package
    #[error("Not an xlsx workbook: {0}")]
    InvalidFormat(String),

    /// `[Content_Types].xml`, `xl/workbook.xml` or a referenced sheet part
    #[error("Workbook part missing: {0}")]
    MissingPart(String),

    /// Bad shared-string index, cell reference or attribute value
    #[error("Unreadable cell data: {0}")]
    Parse(String),

    /// Cell or sheet rejected by the workbook model
    #[error(transparent)]
    Core(#[from] refanchor_core::Error),
}
