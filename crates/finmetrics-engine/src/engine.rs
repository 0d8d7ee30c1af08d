//! Ratio engine: runs the catalog over one record.

use crate::catalog::{MetricRule, rules};
use crate::diagnostics::Diagnostics;
use crate::metric::{MetricSet, MetricValue};
use crate::price::MarketPrice;
use finmetrics_data::FinancialRecord;
use serde::Serialize;
use tracing::debug;

/// Result of one engine run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Computation {
    /// Every catalog metric plus the market price
    pub metrics: MetricSet,
    /// Why each unavailable metric could not be computed, in attempt order
    pub diagnostics: Vec<String>,
}

/// Evaluates the metric catalog against a record.
///
/// Stateless between runs: each call starts a fresh result set and diagnostic
/// log, so the same inputs always produce the same output and one engine can
/// be shared freely.
#[derive(Debug, Clone, Copy)]
pub struct RatioEngine {
    rules: &'static [MetricRule],
}

impl Default for RatioEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RatioEngine {
    /// Create an engine over the standard catalog.
    pub fn new() -> Self {
        Self { rules: rules() }
    }

    /// Compute every metric for `record` at `price`.
    ///
    /// Never fails. A metric that cannot be computed is marked unavailable
    /// and the reason appended to the diagnostics; the remaining metrics are
    /// still attempted.
    pub fn compute(&self, record: &FinancialRecord, price: MarketPrice) -> Computation {
        let mut diagnostics = Diagnostics::new();
        let mut metrics = MetricSet::new(price.value());

        for rule in self.rules {
            let before = diagnostics.len();
            let value = rule.evaluate(record, price.value(), &metrics, &mut diagnostics);
            if value == MetricValue::UNAVAILABLE {
                let mut reasons = diagnostics.iter().skip(before).peekable();
                if reasons.peek().is_none() {
                    debug!(metric = %rule.metric, "metric unavailable: dependency not computed");
                }
                for reason in reasons {
                    debug!(metric = %rule.metric, reason, "metric unavailable");
                }
            }
            metrics.insert(rule.metric, value);
        }

        debug!(
            source = record.source(),
            available = metrics.available_count(),
            diagnostics = diagnostics.len(),
            "computation finished"
        );

        Computation {
            metrics,
            diagnostics: diagnostics.into_vec(),
        }
    }
}

/// Compute the metric set and diagnostic log for `record` at `price`.
pub fn compute(record: &FinancialRecord, price: MarketPrice) -> (MetricSet, Vec<String>) {
    let Computation {
        metrics,
        diagnostics,
    } = RatioEngine::new().compute(record, price);
    (metrics, diagnostics)
}
