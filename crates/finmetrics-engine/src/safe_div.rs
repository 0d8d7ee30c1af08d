//! Guarded division.

use crate::diagnostics::Diagnostics;

/// Divide `numerator` by `denominator`, recording `failure_note` when the
/// denominator is missing, zero, or not a number.
///
/// A missing numerator yields `None` without a diagnostic: the field
/// extraction that produced it has already reported the cause. A quotient
/// that overflows to infinity is also reported and collapsed to `None`, so a
/// `Some` result is always finite.
pub fn safe_divide(
    numerator: Option<f64>,
    denominator: Option<f64>,
    failure_note: &str,
    diagnostics: &mut Diagnostics,
) -> Option<f64> {
    let denominator = match denominator {
        Some(d) if d.is_finite() && d != 0.0 => d,
        _ => {
            diagnostics.push(failure_note);
            return None;
        }
    };
    let numerator = numerator.filter(|n| n.is_finite())?;

    let quotient = numerator / denominator;
    if quotient.is_finite() {
        Some(quotient)
    } else {
        diagnostics.push(format!(
            "Division failed: {numerator:?} / {denominator:?} is not finite"
        ));
        None
    }
}
