#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/finmetrics/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analysis;
pub mod error;

// Re-export main types from sub-crates
pub use finmetrics_data as data;
pub use finmetrics_engine as engine;
pub use finmetrics_output as output;

pub use analysis::{Analysis, analyze_file, analyze_record};
pub use error::{Error, Result};
pub use finmetrics_data::{FinancialRecord, load_record};
pub use finmetrics_engine::{MarketPrice, Metric, MetricSet, compute};
pub use finmetrics_output::{ExportFormat, Exporter, Report};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
