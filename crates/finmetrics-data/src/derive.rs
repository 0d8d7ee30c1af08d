//! Fields worked out from other facts when a filing leaves them out.
//!
//! SEBI `in-capmkt` filings report profit, equity, total liabilities and the
//! weighted share count, but no per-share figures and no debt line.

use crate::fields;
use crate::record::FieldValue;
use std::collections::BTreeMap;
use tracing::debug;

struct Derivation {
    target: &'static str,
    left: &'static str,
    right: &'static str,
    combine: fn(f64, f64) -> Option<f64>,
}

fn per_share(amount: f64, shares: f64) -> Option<f64> {
    (shares != 0.0).then(|| amount / shares)
}

fn difference(total: f64, part: f64) -> Option<f64> {
    Some(total - part)
}

const DERIVATIONS: [Derivation; 3] = [
    Derivation {
        target: fields::EPS,
        left: fields::NET_INCOME,
        right: fields::SHARES_OUTSTANDING,
        combine: per_share,
    },
    Derivation {
        target: fields::BOOK_VALUE_PER_SHARE,
        left: fields::TOTAL_EQUITY,
        right: fields::SHARES_OUTSTANDING,
        combine: per_share,
    },
    // Everything that is not equity counts as debt
    Derivation {
        target: fields::TOTAL_DEBT,
        left: fields::TOTAL_LIABILITIES,
        right: fields::TOTAL_EQUITY,
        combine: difference,
    },
];

/// Adds EPS, Book Value Per Share and Total Debt when the source did not
/// carry them and their inputs are numeric. Reported values are never
/// overwritten, even when they do not parse.
pub(crate) fn fill_missing(values: &mut BTreeMap<String, FieldValue>) {
    for derivation in &DERIVATIONS {
        if values.contains_key(derivation.target) {
            continue;
        }

        let input = |field: &str| values.get(field).and_then(FieldValue::as_finite);
        let (Some(left), Some(right)) = (input(derivation.left), input(derivation.right)) else {
            continue;
        };

        if let Some(value) = (derivation.combine)(left, right).filter(|v| v.is_finite()) {
            debug!(field = derivation.target, value, "derived missing field");
            values.insert(derivation.target.to_string(), FieldValue::Number(value));
        }
    }
}
