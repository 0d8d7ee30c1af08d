//! Error types for the ratio engine boundary.

use thiserror::Error;

/// Errors raised when building engine inputs.
///
/// The computation itself is infallible; only invalid inputs are rejected,
/// before the engine ever sees them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Market price is negative, NaN, or infinite
    #[error("Invalid market price {0}: must be a finite, non-negative number")]
    InvalidMarketPrice(f64),
}
