//! Record normalization: turn a filing on disk into a [`FinancialRecord`].
//!
//! Each supported format has its own parser that works on in-memory input,
//! so callers holding an upload can skip the filesystem entirely.

mod json;
mod spreadsheet;
mod tabular;
mod xml;

pub use self::json::parse_json;
pub use self::spreadsheet::parse_excel;
pub use self::tabular::parse_csv;
pub use self::xml::parse_xml;

use crate::error::{DataError, Result};
use crate::record::FinancialRecord;
use std::path::Path;
use tracing::{debug, info};

/// Source formats the normalizer can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Comma-separated values with a header row
    Csv,
    /// XML or XBRL instance document
    Xml,
    /// Flat JSON object
    Json,
    /// Excel or OpenDocument workbook, first worksheet
    Excel,
}

impl SourceFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "xml" | "xbrl" => Ok(Self::Xml),
            "json" => Ok(Self::Json),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Excel),
            "" => Err(DataError::UnsupportedFormat("<none>".to_string())),
            other => Err(DataError::UnsupportedFormat(format!(".{other}"))),
        }
    }

    /// Parse raw file contents in this format.
    ///
    /// Text formats must be valid UTF-8.
    pub fn parse(self, bytes: &[u8], source: &str) -> Result<FinancialRecord> {
        let text = || {
            std::str::from_utf8(bytes)
                .map_err(|e| DataError::Parse(format!("{source} is not valid UTF-8: {e}")))
        };
        match self {
            Self::Csv => parse_csv(text()?, source),
            Self::Xml => parse_xml(text()?, source),
            Self::Json => parse_json(text()?, source),
            Self::Excel => parse_excel(bytes, source),
        }
    }
}

/// Read and normalize the filing at `path`.
///
/// The record's source label is the file name.
pub fn load_record(path: impl AsRef<Path>) -> Result<FinancialRecord> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(DataError::FileNotFound(path.display().to_string()));
    }

    let format = SourceFormat::from_path(path)?;
    let source = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    debug!(path = %path.display(), ?format, "reading filing");
    let bytes = std::fs::read(path)?;
    let record = format.parse(&bytes, &source)?;
    info!(source = %source, fields = record.len(), "loaded financial record");

    Ok(record)
}
