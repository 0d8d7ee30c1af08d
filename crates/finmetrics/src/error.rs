//! Error type for the analysis pipeline.

use finmetrics_data::DataError;
use finmetrics_engine::EngineError;
use thiserror::Error;

/// Errors surfaced by [`analyze_file`](crate::analyze_file).
#[derive(Debug, Error)]
pub enum Error {
    /// Loading or normalizing the input failed.
    #[error(transparent)]
    Data(#[from] DataError),

    /// The market price was rejected.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
