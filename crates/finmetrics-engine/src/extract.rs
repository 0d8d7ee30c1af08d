//! Field extraction from a record.

use crate::diagnostics::Diagnostics;
use finmetrics_data::FinancialRecord;

/// Read `field` from `record` as a finite float.
///
/// Absent, blank, non-numeric, NaN, and infinite values all come back as
/// `None` with the diagnostic `"{label}: Could not parse '{field}'"`.
pub fn extract(
    record: &FinancialRecord,
    field: &str,
    label: &str,
    diagnostics: &mut Diagnostics,
) -> Option<f64> {
    let value = record.get(field).and_then(|v| v.as_finite());
    if value.is_none() {
        diagnostics.push(format!("{label}: Could not parse '{field}'"));
    }
    value
}
