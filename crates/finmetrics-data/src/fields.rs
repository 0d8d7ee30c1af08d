//! Field vocabulary shared by the normalizer and the ratio engine.
//!
//! A record source must key its values by exactly these names. Missing data is
//! signalled by leaving the key out, never by writing zero.

/// Earnings per share
pub const EPS: &str = "EPS";

/// Book value per share
pub const BOOK_VALUE_PER_SHARE: &str = "Book Value Per Share";

/// Revenue per share
pub const REVENUE_PER_SHARE: &str = "Revenue Per Share";

/// Year-over-year EPS growth, already expressed in percent
pub const EPS_GROWTH_RATE: &str = "EPS Growth Rate (%)";

/// Total revenue (net sales)
pub const REVENUE: &str = "Revenue";

/// Cost of goods sold
pub const COGS: &str = "COGS";

/// Operating income
pub const OPERATING_INCOME: &str = "Operating Income";

/// Net income
pub const NET_INCOME: &str = "Net Income";

/// Current assets
pub const CURRENT_ASSETS: &str = "Current Assets";

/// Current liabilities
pub const CURRENT_LIABILITIES: &str = "Current Liabilities";

/// Total debt
pub const TOTAL_DEBT: &str = "Total Debt";

/// Total shareholders' equity
pub const TOTAL_EQUITY: &str = "Total Equity";

/// Shareholders' equity averaged over the period
pub const AVERAGE_SHAREHOLDERS_EQUITY: &str = "Average Shareholders Equity";

/// Total assets averaged over the period
pub const AVERAGE_TOTAL_ASSETS: &str = "Average Total Assets";

/// Every field the ratio engine reads.
pub const ALL: &[&str] = &[
    EPS,
    BOOK_VALUE_PER_SHARE,
    REVENUE_PER_SHARE,
    EPS_GROWTH_RATE,
    REVENUE,
    COGS,
    OPERATING_INCOME,
    NET_INCOME,
    CURRENT_ASSETS,
    CURRENT_LIABILITIES,
    TOTAL_DEBT,
    TOTAL_EQUITY,
    AVERAGE_SHAREHOLDERS_EQUITY,
    AVERAGE_TOTAL_ASSETS,
];

/// Weighted average number of shares outstanding
pub const SHARES_OUTSTANDING: &str = "Shares Outstanding";

/// Total liabilities
pub const TOTAL_LIABILITIES: &str = "Total Liabilities";

/// Raw facts the engine never reads directly but that per-share and debt
/// figures can be derived from.
pub const SUPPORTING: &[&str] = &[SHARES_OUTSTANDING, TOTAL_LIABILITIES];

/// Returns the vocabulary entry equal to `name`, if any.
pub fn known(name: &str) -> Option<&'static str> {
    ALL.iter()
        .chain(SUPPORTING)
        .copied()
        .find(|field| *field == name)
}
