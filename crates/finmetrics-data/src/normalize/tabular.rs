use crate::error::{DataError, Result};
use crate::record::{FieldValue, FinancialRecord};

/// Parse CSV text into a record.
///
/// The header row names the fields and the first data row supplies the
/// values. Later rows are ignored: the analysis covers a single period.
pub fn parse_csv(text: &str, source: &str) -> Result<FinancialRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.iter().all(str::is_empty) {
        return Err(DataError::EmptySource("CSV has no header row".to_string()));
    }

    let row = reader
        .records()
        .next()
        .ok_or_else(|| DataError::EmptySource("CSV has no data rows".to_string()))??;

    let record = headers
        .iter()
        .zip(row.iter())
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, cell)| (name.to_string(), FieldValue::from_cell(cell)))
        .collect::<FinancialRecord>()
        .with_source(source)
        .with_derived_fields();

    Ok(record)
}
