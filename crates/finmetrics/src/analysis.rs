//! One-shot pipeline: load a filing, compute metrics, build a report.

use crate::error::Result;
use finmetrics_data::{FinancialRecord, load_record};
use finmetrics_engine::{Computation, MarketPrice, RatioEngine};
use finmetrics_output::Report;
use std::path::Path;
use tracing::info;

/// A record together with the metrics computed from it.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// The normalized input.
    pub record: FinancialRecord,

    /// Metrics and diagnostics.
    pub computation: Computation,
}

impl Analysis {
    /// Build a report stamped with the current time.
    pub fn report(&self) -> Report {
        Report::new(self.record.source().to_string(), self.computation.clone())
    }
}

/// Load `path` and compute every metric at `price`.
///
/// # Errors
///
/// Returns an error if the file is missing, its format is unsupported, or
/// it cannot be parsed. Missing or unparseable fields are not errors; they
/// show up as diagnostics in the computation.
pub fn analyze_file(path: impl AsRef<Path>, price: MarketPrice) -> Result<Analysis> {
    let record = load_record(path.as_ref())?;
    Ok(analyze_record(record, price))
}

/// Compute every metric for an already loaded record.
pub fn analyze_record(record: FinancialRecord, price: MarketPrice) -> Analysis {
    let computation = RatioEngine::new().compute(&record, price);
    info!(
        source = record.source(),
        available = computation.metrics.available_count(),
        diagnostics = computation.diagnostics.len(),
        "Analysis complete"
    );

    Analysis {
        record,
        computation,
    }
}
