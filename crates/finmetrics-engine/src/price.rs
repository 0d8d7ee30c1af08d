//! User-supplied market price.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current market price per share. Always finite and non-negative.
///
/// Zero is accepted: price-derived ratios then come out as zero rather than
/// failing.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct MarketPrice(f64);

impl MarketPrice {
    /// Validate and wrap a price.
    pub fn new(value: f64) -> Result<Self, EngineError> {
        if value.is_finite() && value >= 0.0 {
            // Normalise -0.0 so it renders as 0
            Ok(Self(value.abs()))
        } else {
            Err(EngineError::InvalidMarketPrice(value))
        }
    }

    /// The raw price.
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for MarketPrice {
    type Error = EngineError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MarketPrice> for f64 {
    fn from(price: MarketPrice) -> Self {
        price.0
    }
}

impl fmt::Display for MarketPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
