//! Console rendering of metric sets and diagnostics.

use crate::report::NO_ERRORS;
use finmetrics_engine::{MetricSet, MetricValue};

const WIDTH: usize = 44;

/// Row order for [`render_table`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableOrder {
    /// Market price first, then catalog order.
    #[default]
    Catalog,

    /// Alphabetical by metric name.
    Name,
}

/// Render metrics as an ASCII table with values to four decimals.
pub fn render_table(metrics: &MetricSet, order: TableOrder) -> String {
    let mut rows: Vec<(&'static str, MetricValue)> = metrics.iter().collect();
    if order == TableOrder::Name {
        rows.sort_by_key(|(name, _)| *name);
    }

    let mut output = String::new();
    output.push_str(&format!("{:<28} {:>15}\n", "Metric", "Value"));
    output.push_str(&"=".repeat(WIDTH));
    output.push('\n');

    for (name, value) in rows {
        let cell = match value.value() {
            Some(v) => format!("{v:.4}"),
            None => "N/A".to_string(),
        };
        output.push_str(&format!("{name:<28} {cell:>15}\n"));
    }

    output.push_str(&"-".repeat(WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "{:<28} {:>15}\n",
        "Available",
        format!("{}/{}", metrics.available_count(), metrics.len() - 1)
    ));

    output
}

/// Render diagnostics as a bullet list.
pub fn render_diagnostics(diagnostics: &[String]) -> String {
    if diagnostics.is_empty() {
        return format!("{NO_ERRORS}\n");
    }

    diagnostics.iter().map(|d| format!("- {d}\n")).collect()
}
