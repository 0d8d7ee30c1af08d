//! Error types for record loading.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while reading a filing into a record.
///
/// Only whole-source failures live here. A single unreadable field is not an
/// error at this layer; it is carried into the record and reported by the
/// engine as a diagnostic.
#[derive(Debug, Error)]
pub enum DataError {
    /// Input path does not exist
    #[error("No such file: {0}")]
    FileNotFound(String),

    /// Extension is not one of the supported source formats
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Source parsed but held no record
    #[error("Empty source: {0}")]
    EmptySource(String),

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// XML parsing error
    #[error("XML parsing error: {0}")]
    XmlParse(String),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook could not be opened or read
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for DataError {
    fn from(err: quick_xml::Error) -> Self {
        Self::XmlParse(err.to_string())
    }
}
