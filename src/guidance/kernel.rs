//! Numeric helpers shared by the scoring components.

/// Slack applied to tolerance comparisons so that decimal GPAs such as
/// `3.8 - 3.3` still count as a difference of `0.5`.
pub const TOLERANCE_SLACK: f64 = 1e-9;

/// Absolute difference capped at `cap`.
pub fn bounded_difference(a: f64, b: f64, cap: f64) -> f64 {
    (a - b).abs().min(cap)
}

/// Clamps a score into `[0, 1]`. NaN collapses to zero.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Sum of `weight * signal` over paired slices.
pub fn weighted_sum(weights: &[f64], signals: &[f64]) -> f64 {
    weights
        .iter()
        .zip(signals)
        .map(|(weight, signal)| weight * signal)
        .sum()
}

pub fn within_tolerance(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance + TOLERANCE_SLACK
}

/// Linear closeness in `[0, 1]`: 1 for equal values, 0 once the gap reaches `span`.
pub fn closeness(a: f64, b: f64, span: f64) -> f64 {
    if span <= 0.0 {
        return if a == b { 1.0 } else { 0.0 };
    }
    1.0 - bounded_difference(a, b, span) / span
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_difference_caps_large_gaps() {
        assert_eq!(bounded_difference(3.0, 3.5, 1.0), 0.5);
        assert_eq!(bounded_difference(1.0, 4.0, 1.0), 1.0);
        assert_eq!(bounded_difference(4.0, 1.0, 1.0), 1.0);
    }

    #[test]
    fn clamp_unit_bounds_values() {
        assert_eq!(clamp_unit(-0.2), 0.0);
        assert_eq!(clamp_unit(1.0000001), 1.0);
        assert_eq!(clamp_unit(0.42), 0.42);
        assert_eq!(clamp_unit(f64::NAN), 0.0);
    }

    #[test]
    fn weighted_sum_pairs_weights_and_signals() {
        let total = weighted_sum(&[0.3, 0.2, 0.5], &[1.0, 0.5, 0.0]);
        assert!((total - 0.4).abs() < 1e-12);
    }

    #[test]
    fn tolerance_absorbs_decimal_noise() {
        assert!(within_tolerance(3.8, 3.3, 0.5));
        assert!(within_tolerance(3.3, 3.8, 0.5));
        assert!(!within_tolerance(3.81, 3.3, 0.5));
    }

    #[test]
    fn closeness_is_linear_within_span() {
        assert_eq!(closeness(3.0, 3.0, 1.0), 1.0);
        assert!((closeness(3.0, 3.25, 1.0) - 0.75).abs() < 1e-12);
        assert_eq!(closeness(2.0, 3.5, 1.0), 0.0);
    }
}
