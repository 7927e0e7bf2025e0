//! Grid snapping for courtyard and text coordinates.

/// Rounds `value` to the nearest multiple of `base`.
///
/// A `base` of zero disables rounding and returns `value` unchanged. Ties are
/// rounded half away from zero, following [`f64::round`].
///
/// # Examples
///
/// ```
/// use connector_footprints::geometry::round_to_base;
///
/// assert!((round_to_base(1.234, 0.01) - 1.23).abs() < 1e-9);
/// assert!((round_to_base(-6.215, 0.05) - -6.2).abs() < 1e-9);
/// assert_eq!(round_to_base(3.14159, 0.0), 3.14159);
/// ```
#[must_use]
pub fn round_to_base(value: f64, base: f64) -> f64 {
    if base == 0.0 {
        return value;
    }
    (value / base).round() * base
}
