//! 0.5mm 単位の丸め
//!
//! Widths are rounded by doubling, rounding half away from zero with
//! [`f64::round`], and halving again. `f64::round` does not depend on the
//! platform rounding mode, so the same input always lands on the same step.

use crate::constants::ROUNDING_STEP;

/// Rounds `x` to the nearest multiple of 0.5 (ties away from zero).
pub fn round_half(x: f64) -> f64 {
    (x / ROUNDING_STEP).round() * ROUNDING_STEP
}

/// Returns true when `x` is an exact multiple of 0.5.
pub fn is_half_multiple(x: f64) -> bool {
    let doubled = x / ROUNDING_STEP;
    doubled.is_finite() && doubled.fract() == 0.0
}
