//! Plain-text metrics report.

use chrono::{DateTime, Local};
use finmetrics_engine::{Computation, MetricSet};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// File name used when the caller does not pick one.
pub const DEFAULT_REPORT_FILE: &str = "financial_metrics.txt";

/// Line written when a run produced no diagnostics.
pub(crate) const NO_ERRORS: &str = "No errors detected.";

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Builder was finished without a computation.
    #[error("Report has no metrics: call `computation` before `build`")]
    MissingMetrics,
}

/// A finished analysis, ready to render or export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Where the record came from.
    pub input_source: String,

    /// Report generation timestamp.
    pub generated_at: DateTime<Local>,

    /// Computed metrics, market price first.
    pub metrics: MetricSet,

    /// Why each unavailable metric could not be computed.
    pub diagnostics: Vec<String>,
}

impl Report {
    /// Create a report stamped with the current time.
    pub fn new(input_source: String, computation: Computation) -> Self {
        Self {
            input_source,
            generated_at: Local::now(),
            metrics: computation.metrics,
            diagnostics: computation.diagnostics,
        }
    }

    /// Render the report as plain text.
    ///
    /// Output depends only on the report's fields, so a report with a pinned
    /// timestamp always renders identically.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Financial Metrics Report")?;
        writeln!(
            f,
            "Generated: {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(f, "Input source: {}", self.input_source)?;
        writeln!(f)?;

        writeln!(f, "=== Calculated Metrics ===")?;
        for (name, value) in self.metrics.iter() {
            writeln!(f, "{name}: {value}")?;
        }
        writeln!(f)?;

        writeln!(f, "=== Errors & Missing Data ===")?;
        if self.diagnostics.is_empty() {
            writeln!(f, "{NO_ERRORS}")?;
        }
        for entry in &self.diagnostics {
            writeln!(f, "{entry}")?;
        }

        Ok(())
    }
}

/// Builder for creating reports.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    input_source: Option<String>,
    generated_at: Option<DateTime<Local>>,
    computation: Option<Computation>,
}

impl ReportBuilder {
    /// Create a new report builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input source label.
    pub fn input_source(mut self, source: impl Into<String>) -> Self {
        self.input_source = Some(source.into());
        self
    }

    /// Pin the generation timestamp.
    pub const fn generated_at(mut self, timestamp: DateTime<Local>) -> Self {
        self.generated_at = Some(timestamp);
        self
    }

    /// Set the computation to report on.
    pub fn computation(mut self, computation: Computation) -> Self {
        self.computation = Some(computation);
        self
    }

    /// Build the report.
    pub fn build(self) -> Result<Report, ReportError> {
        let computation = self.computation.ok_or(ReportError::MissingMetrics)?;
        Ok(Report {
            input_source: self.input_source.unwrap_or_else(|| "unknown".to_string()),
            generated_at: self.generated_at.unwrap_or_else(Local::now),
            metrics: computation.metrics,
            diagnostics: computation.diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use finmetrics_data::{FinancialRecord, fields};
    use finmetrics_engine::{MarketPrice, RatioEngine};

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap()
    }

    fn computation(pairs: &[(&str, f64)], price: f64) -> Computation {
        let record = FinancialRecord::from_pairs(pairs.iter().copied());
        RatioEngine::new().compute(&record, MarketPrice::new(price).unwrap())
    }

    #[test]
    fn test_report_text_layout() {
        let report = ReportBuilder::new()
            .input_source("filing.xml")
            .generated_at(fixed_time())
            .computation(computation(
                &[(fields::REVENUE, 1000.0), (fields::COGS, 600.0), (fields::EPS, 10.0)],
                50.0,
            ))
            .build()
            .unwrap();

        let text = report.to_text();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Financial Metrics Report");
        assert_eq!(lines[1], "Generated: 2024-03-15 09:30:00");
        assert_eq!(lines[2], "Input source: filing.xml");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "=== Calculated Metrics ===");
        assert_eq!(lines[5], "Market Price: 50.0");
        assert_eq!(lines[6], "P/E Ratio: 5.0");
        assert_eq!(lines[7], "P/B Ratio: N/A");
        assert!(text.contains("Gross Profit Margin (%): 40.0\n"));
        assert!(text.contains("=== Errors & Missing Data ===\nP/B: Could not parse"));
        assert!(text.ends_with("ROA: Could not parse 'Average Total Assets'\n"));
    }

    #[test]
    fn test_report_without_diagnostics() {
        let pairs: Vec<(&str, f64)> = fields::ALL.iter().map(|f| (*f, 2.0)).collect();
        let report = ReportBuilder::new()
            .computation(computation(&pairs, 10.0))
            .generated_at(fixed_time())
            .build()
            .unwrap();

        let text = report.to_text();
        assert!(text.contains("Input source: unknown\n"));
        assert!(text.ends_with("=== Errors & Missing Data ===\nNo errors detected.\n"));
        assert!(!text.contains("N/A"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let build = || {
            ReportBuilder::new()
                .input_source("data.csv")
                .generated_at(fixed_time())
                .computation(computation(&[(fields::EPS, 0.0)], 12.5))
                .build()
                .unwrap()
        };

        assert_eq!(build().to_text(), build().to_text());
    }

    #[test]
    fn test_display_matches_text() {
        let report = ReportBuilder::new()
            .input_source("filing.csv")
            .generated_at(fixed_time())
            .computation(computation(&[(fields::EPS, 2.0)], 10.0))
            .build()
            .unwrap();

        assert_eq!(format!("{report}"), report.to_text());
        assert!(format!("{report}").starts_with("Financial Metrics Report\nGenerated: 2024-03-15"));
    }

    #[test]
    fn test_builder_requires_computation() {
        let err = ReportBuilder::new().input_source("x").build().unwrap_err();
        assert!(matches!(err, ReportError::MissingMetrics));
    }

    #[test]
    fn test_report_new_uses_computation() {
        let report = Report::new(
            "memo".to_string(),
            computation(&[(fields::EPS, 4.0)], 20.0),
        );
        assert_eq!(report.input_source, "memo");
        assert_eq!(report.metrics.market_price(), 20.0);
    }
}
