use crate::error::{DataError, Result};
use crate::record::{FieldValue, FinancialRecord};
use calamine::{Data, Reader, open_workbook_auto_from_rs};
use std::io::Cursor;

/// Parse an Excel or OpenDocument workbook into a record.
///
/// Only the first worksheet is read. As with CSV, its first non-empty row
/// names the fields and the next row supplies the values.
pub fn parse_excel(bytes: &[u8], source: &str) -> Result<FinancialRecord> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let sheet = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DataError::EmptySource("Workbook has no worksheets".to_string()))??;

    let mut rows = sheet.rows();
    let headers = rows
        .next()
        .ok_or_else(|| DataError::EmptySource("Worksheet has no header row".to_string()))?;
    let values = rows
        .next()
        .ok_or_else(|| DataError::EmptySource("Worksheet has no data rows".to_string()))?;

    Ok(headers
        .iter()
        .zip(values)
        .map(|(name, cell)| (name.to_string().trim().to_string(), cell_value(cell)))
        .filter(|(name, _)| !name.is_empty())
        .collect::<FinancialRecord>()
        .with_source(source)
        .with_derived_fields())
}

fn cell_value(cell: &Data) -> FieldValue {
    match cell {
        Data::Float(v) => FieldValue::Number(*v),
        Data::Int(v) => FieldValue::Number(*v as f64),
        Data::String(s) => FieldValue::from_cell(s),
        Data::Empty => FieldValue::Empty,
        other => FieldValue::Text(other.to_string()),
    }
}
