//! Coefficient shrinkage.

use statrs::statistics::Statistics;

/// Thresholding rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThresholdMode {
    /// Shrink magnitudes toward zero by the threshold.
    #[default]
    Soft,
    /// Zero coefficients whose magnitude is below the threshold.
    Hard,
}

/// Apply a threshold to a coefficient band.
pub fn threshold(coeffs: &[f64], value: f64, mode: ThresholdMode) -> Vec<f64> {
    coeffs
        .iter()
        .map(|&c| match mode {
            ThresholdMode::Soft => c.signum() * (c.abs() - value).max(0.0),
            ThresholdMode::Hard => {
                if c.abs() < value {
                    0.0
                } else {
                    c
                }
            }
        })
        .collect()
}

/// Universal threshold `sigma * sqrt(2 ln n)`.
///
/// `sigma` is the population standard deviation of the finest detail band
/// and `n` the length of the original signal.
pub fn universal_threshold(finest_detail: &[f64], signal_len: usize) -> f64 {
    if finest_detail.is_empty() || signal_len == 0 {
        return 0.0;
    }
    let sigma = finest_detail.iter().population_std_dev();
    sigma * (2.0 * (signal_len as f64).ln()).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_soft_threshold() {
        let out = threshold(&[-3.0, -0.5, 0.0, 0.5, 3.0], 1.0, ThresholdMode::Soft);
        assert_eq!(out, vec![-2.0, 0.0, 0.0, 0.0, 2.0]);
    }

    #[test]
    fn test_hard_threshold() {
        let out = threshold(&[-3.0, -0.5, 0.5, 3.0], 1.0, ThresholdMode::Hard);
        assert_eq!(out, vec![-3.0, 0.0, 0.0, 3.0]);
    }

    #[test]
    fn test_universal_threshold() {
        // population std of [1, -1, 1, -1] is 1
        let t = universal_threshold(&[1.0, -1.0, 1.0, -1.0], 8);
        assert_relative_eq!(t, (2.0 * 8f64.ln()).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_universal_threshold_degenerate() {
        assert_eq!(universal_threshold(&[], 8), 0.0);
        assert_eq!(universal_threshold(&[2.0, 2.0], 1), 0.0);
    }
}
