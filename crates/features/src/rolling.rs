//! Rolling window primitives.
//!
//! Windows are trailing and use every available observation during warm-up
//! (a window of `n` over the first `k < n` rows covers `k` rows), so no
//! output contains NaN.

use statrs::statistics::Statistics;

/// Start of the trailing window ending at `t`.
#[inline]
fn window_start(t: usize, window: usize) -> usize {
    (t + 1).saturating_sub(window.max(1))
}

/// Simple moving average.
pub fn sma(values: &[f64], window: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (t, &v) in values.iter().enumerate() {
        sum += v;
        let start = window_start(t, window);
        if start > 0 {
            sum -= values[start - 1];
        }
        out.push(sum / (t + 1 - start) as f64);
    }
    out
}

/// Adjusted exponentially weighted mean with smoothing factor `alpha`.
///
/// `y[t] = sum((1-a)^i x[t-i]) / sum((1-a)^i)` over all `i <= t`.
pub fn ewm(values: &[f64], alpha: f64) -> Vec<f64> {
    let decay = 1.0 - alpha;
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    values
        .iter()
        .map(|&v| {
            numerator = v + decay * numerator;
            denominator = 1.0 + decay * denominator;
            numerator / denominator
        })
        .collect()
}

/// Exponential moving average with span `window` (`alpha = 2 / (n + 1)`).
pub fn ema(values: &[f64], window: usize) -> Vec<f64> {
    ewm(values, 2.0 / (window as f64 + 1.0))
}

/// Wilder's smoothed moving average (`alpha = 1 / n`).
pub fn smma(values: &[f64], window: usize) -> Vec<f64> {
    ewm(values, 1.0 / window.max(1) as f64)
}

/// Rolling sample standard deviation; 0 while fewer than two rows.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    (0..values.len())
        .map(|t| {
            let slice = &values[window_start(t, window)..=t];
            if slice.len() < 2 {
                0.0
            } else {
                slice.iter().std_dev()
            }
        })
        .collect()
}

/// Rolling maximum.
pub fn rolling_max(values: &[f64], window: usize) -> Vec<f64> {
    (0..values.len())
        .map(|t| {
            values[window_start(t, window)..=t]
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max)
        })
        .collect()
}

/// Rolling minimum.
pub fn rolling_min(values: &[f64], window: usize) -> Vec<f64> {
    (0..values.len())
        .map(|t| {
            values[window_start(t, window)..=t]
                .iter()
                .copied()
                .fold(f64::INFINITY, f64::min)
        })
        .collect()
}

/// First difference; the first value is 0.
pub fn diff(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    if !values.is_empty() {
        out.push(0.0);
    }
    out.extend(values.windows(2).map(|w| w[1] - w[0]));
    out
}
