#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/finmetrics/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod catalog;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod extract;
pub mod metric;
pub mod price;
pub mod safe_div;

pub use catalog::{MetricRule, get_rule, rules};
pub use diagnostics::Diagnostics;
pub use engine::{Computation, RatioEngine, compute};
pub use error::EngineError;
pub use extract::extract;
pub use metric::{Metric, MetricSet, MetricValue};
pub use price::MarketPrice;
pub use safe_div::safe_divide;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
