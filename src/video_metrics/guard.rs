//! Scalar guards shared by every derivation in this module.

/// Divides `numerator` by `denominator`, treating any denominator below 1 as 1.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    safe_div_floor(numerator, denominator, 1.0)
}

/// Divides `numerator` by `max(floor, denominator)`.
pub fn safe_div_floor(numerator: f64, denominator: f64, floor: f64) -> f64 {
    numerator / floor.max(denominator)
}

/// Restricts `value` to `[lo, hi]`.
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}
