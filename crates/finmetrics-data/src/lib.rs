#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/finmetrics/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod derive;
pub mod error;
pub mod fields;
pub mod normalize;
pub mod record;
pub mod xbrl;

pub use error::{DataError, Result};
pub use normalize::{SourceFormat, load_record, parse_csv, parse_excel, parse_json, parse_xml};
pub use record::{FieldValue, FinancialRecord};
pub use xbrl::XbrlTagMapper;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
