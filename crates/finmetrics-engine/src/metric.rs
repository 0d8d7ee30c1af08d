//! Metric names, results, and the ordered result set.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Label of the raw market price entry in a [`MetricSet`].
pub const MARKET_PRICE: &str = "Market Price";

/// The fixed catalog of computed metrics, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Metric {
    /// Price / EPS
    #[serde(rename = "P/E Ratio")]
    PeRatio,
    /// Price / book value per share
    #[serde(rename = "P/B Ratio")]
    PbRatio,
    /// Price / revenue per share
    #[serde(rename = "P/S Ratio")]
    PsRatio,
    /// P/E / EPS growth rate
    #[serde(rename = "PEG Ratio")]
    PegRatio,
    /// (Revenue - COGS) / Revenue, percent
    #[serde(rename = "Gross Profit Margin (%)")]
    GrossProfitMargin,
    /// Operating income / Revenue, percent
    #[serde(rename = "Operating Margin (%)")]
    OperatingMargin,
    /// Net income / Revenue, percent
    #[serde(rename = "Net Profit Margin (%)")]
    NetProfitMargin,
    /// Current assets / Current liabilities
    #[serde(rename = "Current Ratio")]
    CurrentRatio,
    /// Total debt / Total equity
    #[serde(rename = "Debt to Equity Ratio")]
    DebtToEquity,
    /// Net income / Average shareholders equity, percent
    #[serde(rename = "Return on Equity (%)")]
    ReturnOnEquity,
    /// Net income / Average total assets, percent
    #[serde(rename = "Return on Assets (%)")]
    ReturnOnAssets,
}

impl Metric {
    /// Number of metrics in the catalog.
    pub const COUNT: usize = 11;

    /// Every metric in evaluation order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::PeRatio,
        Self::PbRatio,
        Self::PsRatio,
        Self::PegRatio,
        Self::GrossProfitMargin,
        Self::OperatingMargin,
        Self::NetProfitMargin,
        Self::CurrentRatio,
        Self::DebtToEquity,
        Self::ReturnOnEquity,
        Self::ReturnOnAssets,
    ];

    /// Display name, as shown in reports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::PeRatio => "P/E Ratio",
            Self::PbRatio => "P/B Ratio",
            Self::PsRatio => "P/S Ratio",
            Self::PegRatio => "PEG Ratio",
            Self::GrossProfitMargin => "Gross Profit Margin (%)",
            Self::OperatingMargin => "Operating Margin (%)",
            Self::NetProfitMargin => "Net Profit Margin (%)",
            Self::CurrentRatio => "Current Ratio",
            Self::DebtToEquity => "Debt to Equity Ratio",
            Self::ReturnOnEquity => "Return on Equity (%)",
            Self::ReturnOnAssets => "Return on Assets (%)",
        }
    }

    /// Look a metric up by its display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    /// Whether the stored value is a ratio already multiplied by 100.
    pub const fn is_percentage(self) -> bool {
        matches!(
            self,
            Self::GrossProfitMargin
                | Self::OperatingMargin
                | Self::NetProfitMargin
                | Self::ReturnOnEquity
                | Self::ReturnOnAssets
        )
    }

    /// Position in the catalog.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of one metric: a finite number, or unavailable.
///
/// NaN and infinities cannot be stored; they collapse to unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub struct MetricValue(Option<f64>);

impl MetricValue {
    /// The "could not compute" marker.
    pub const UNAVAILABLE: Self = Self(None);

    /// Wrap a computed number; non-finite input becomes unavailable.
    pub fn new(value: f64) -> Self {
        Self(value.is_finite().then_some(value))
    }

    /// The number, if available.
    pub const fn value(self) -> Option<f64> {
        self.0
    }

    /// Whether a number is present.
    pub const fn is_available(self) -> bool {
        self.0.is_some()
    }
}

impl From<Option<f64>> for MetricValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::UNAVAILABLE, Self::new)
    }
}

impl From<MetricValue> for Option<f64> {
    fn from(value: MetricValue) -> Self {
        value.0
    }
}

impl fmt::Display for MetricValue {
    /// Shortest round-trip rendering (`5.0`, `66.66666666666667`), or `N/A`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v:?}"),
            None => f.write_str("N/A"),
        }
    }
}

/// Output of one computation: the market price plus one result per catalog
/// metric, in catalog order.
///
/// Unavailable metrics are present and marked, never omitted.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSet {
    market_price: f64,
    values: [MetricValue; Metric::COUNT],
}

impl MetricSet {
    /// A set with every metric unavailable.
    pub(crate) const fn new(market_price: f64) -> Self {
        Self {
            market_price,
            values: [MetricValue::UNAVAILABLE; Metric::COUNT],
        }
    }

    pub(crate) const fn insert(&mut self, metric: Metric, value: MetricValue) {
        self.values[metric.index()] = value;
    }

    /// The market price the set was computed with.
    pub const fn market_price(&self) -> f64 {
        self.market_price
    }

    /// Result for `metric`.
    pub const fn get(&self, metric: Metric) -> MetricValue {
        self.values[metric.index()]
    }

    /// Number of metrics that produced a value (market price excluded).
    pub fn available_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_available()).count()
    }

    /// Metrics that could not be computed, in catalog order.
    pub fn unavailable(&self) -> impl Iterator<Item = Metric> + '_ {
        Metric::ALL
            .into_iter()
            .filter(|m| !self.get(*m).is_available())
    }

    /// Computed metrics in catalog order.
    pub fn metrics(&self) -> impl Iterator<Item = (Metric, MetricValue)> + '_ {
        Metric::ALL.into_iter().map(|m| (m, self.get(m)))
    }

    /// Every entry by display name: `Market Price` first, then the catalog.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, MetricValue)> + '_ {
        std::iter::once((MARKET_PRICE, MetricValue::new(self.market_price)))
            .chain(self.metrics().map(|(m, v)| (m.name(), v)))
    }

    /// Number of entries, market price included.
    pub const fn len(&self) -> usize {
        Metric::COUNT + 1
    }

    /// Always false: the market price entry is always present.
    pub const fn is_empty(&self) -> bool {
        false
    }
}

impl Serialize for MetricSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}
