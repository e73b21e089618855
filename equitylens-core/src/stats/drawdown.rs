//! Return and drawdown over an equity series.

/// Percentage change from the first to the last value.
///
/// A zero starting value is not an error: the IEEE result (infinite or NaN)
/// is returned as-is for the caller to display.
pub fn total_return_pct(start_value: f64, end_value: f64) -> f64 {
    (end_value / start_value - 1.0) * 100.0
}

/// Largest peak-to-value decline, as a positive percentage.
///
/// Single forward pass. The running peak starts at negative infinity, so the
/// first point always becomes the peak. Drawdown is only measured while the
/// peak is strictly positive.
pub fn max_drawdown_pct(values: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut max_dd = 0.0_f64;

    for &v in values {
        peak = peak.max(v);
        if peak > 0.0 {
            let dd = (peak - v) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_return_positive() {
        assert!((total_return_pct(100.0, 110.0) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn total_return_negative() {
        assert!((total_return_pct(100_000.0, 90_000.0) - (-10.0)).abs() < 1e-10);
    }

    #[test]
    fn total_return_zero_start_is_non_finite() {
        assert!(!total_return_pct(0.0, 100.0).is_finite());
        assert!(total_return_pct(0.0, 0.0).is_nan());
    }

    #[test]
    fn drawdown_known_series() {
        // peaks: 100, 120, 120, 130 → worst is (120-80)/120
        let dd = max_drawdown_pct(&[100.0, 120.0, 80.0, 130.0]);
        assert!((dd - 100.0 / 3.0).abs() < 1e-9, "got {dd}");
    }

    #[test]
    fn drawdown_monotonic_is_exactly_zero() {
        let eq: Vec<f64> = (0..100).map(|i| 100.0 + i as f64).collect();
        assert_eq!(max_drawdown_pct(&eq), 0.0);
    }

    #[test]
    fn drawdown_flat_is_zero() {
        assert_eq!(max_drawdown_pct(&[50.0; 10]), 0.0);
    }

    #[test]
    fn drawdown_empty_is_zero() {
        assert_eq!(max_drawdown_pct(&[]), 0.0);
    }

    #[test]
    fn non_positive_peak_is_ignored() {
        // peak never rises above zero until the last point
        assert_eq!(max_drawdown_pct(&[-10.0, -20.0, 0.0]), 0.0);
    }

    #[test]
    fn drawdown_to_zero_is_hundred_percent() {
        assert!((max_drawdown_pct(&[100.0, 0.0]) - 100.0).abs() < 1e-12);
    }
}
