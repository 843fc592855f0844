//! Technical indicators over close/high/low series.
//!
//! Column names follow the usual `<source>_<window>_<stat>` convention so
//! downstream consumers can select indicators by name.

use crate::rolling::{diff, ema, rolling_max, rolling_min, rolling_std, sma, smma};
use pricewave_core::{Error, Result};

/// Indicator columns produced by [`IndicatorEngine::compute`], in order.
pub const INDICATOR_NAMES: [&str; 24] = [
    "close_5_sma",
    "close_10_sma",
    "close_20_sma",
    "close_5_ema",
    "close_10_ema",
    "close_20_ema",
    "rsi_14",
    "boll",
    "boll_ub",
    "boll_lb",
    "boll_15",
    "boll_ub_15",
    "boll_lb_15",
    "macd",
    "macds",
    "macdh",
    "kdjk_5",
    "kdjd_5",
    "kdjk_9",
    "kdjd_9",
    "kdjk_14",
    "kdjd_14",
    "wr_14",
    "wr_6",
];

/// Relative Strength Index.
pub fn rsi(close: &[f64], window: usize) -> Vec<f64> {
    let change = diff(close);
    let gains: Vec<f64> = change.iter().map(|c| c.max(0.0)).collect();
    let losses: Vec<f64> = change.iter().map(|c| (-c).max(0.0)).collect();
    let avg_gain = smma(&gains, window);
    let avg_loss = smma(&losses, window);

    avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(&g, &l)| {
            if l == 0.0 {
                if g == 0.0 {
                    50.0
                } else {
                    100.0
                }
            } else {
                100.0 - 100.0 / (1.0 + g / l)
            }
        })
        .collect()
}

/// Bollinger bands: `(mid, upper, lower)` at `width` standard deviations.
pub fn bollinger(close: &[f64], window: usize, width: f64) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let mid = sma(close, window);
    let std = rolling_std(close, window);
    let upper = mid.iter().zip(&std).map(|(m, s)| m + width * s).collect();
    let lower = mid.iter().zip(&std).map(|(m, s)| m - width * s).collect();
    (mid, upper, lower)
}

/// MACD line, signal line and histogram.
pub fn macd(
    close: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let fast_ema = ema(close, fast);
    let slow_ema = ema(close, slow);
    let line: Vec<f64> = fast_ema.iter().zip(&slow_ema).map(|(f, s)| f - s).collect();
    let signal_line = ema(&line, signal);
    let histogram = line.iter().zip(&signal_line).map(|(l, s)| l - s).collect();
    (line, signal_line, histogram)
}

/// Raw stochastic value: position of close within the window's range, 0-100.
fn rsv(high: &[f64], low: &[f64], close: &[f64], window: usize) -> Vec<f64> {
    let highest = rolling_max(high, window);
    let lowest = rolling_min(low, window);
    close
        .iter()
        .zip(highest.iter().zip(&lowest))
        .map(|(c, (h, l))| {
            let range = h - l;
            if range == 0.0 {
                0.0
            } else {
                (c - l) / range * 100.0
            }
        })
        .collect()
}

/// Smooth with weight 1/3 on the new value, seeded at 50.
fn kdj_smooth(values: &[f64]) -> Vec<f64> {
    let mut prev = 50.0;
    values
        .iter()
        .map(|v| {
            prev = 2.0 / 3.0 * prev + v / 3.0;
            prev
        })
        .collect()
}

/// Stochastic oscillator `(K, D)`.
pub fn kdj(high: &[f64], low: &[f64], close: &[f64], window: usize) -> (Vec<f64>, Vec<f64>) {
    let k = kdj_smooth(&rsv(high, low, close, window));
    let d = kdj_smooth(&k);
    (k, d)
}

/// Williams %R, from 0 (at the high) to -100 (at the low).
pub fn williams_r(high: &[f64], low: &[f64], close: &[f64], window: usize) -> Vec<f64> {
    let highest = rolling_max(high, window);
    let lowest = rolling_min(low, window);
    close
        .iter()
        .zip(highest.iter().zip(&lowest))
        .map(|(c, (h, l))| {
            let range = h - l;
            if range == 0.0 {
                0.0
            } else {
                (h - c) / range * -100.0
            }
        })
        .collect()
}

/// Computes the fixed indicator set.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    sma_windows: [usize; 3],
    ema_windows: [usize; 3],
    rsi_window: usize,
    boll_windows: [usize; 2],
    boll_width: f64,
    macd_windows: (usize, usize, usize),
    kdj_windows: [usize; 3],
    wr_windows: [usize; 2],
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self {
            sma_windows: [5, 10, 20],
            ema_windows: [5, 10, 20],
            rsi_window: 14,
            boll_windows: [20, 15],
            boll_width: 2.0,
            macd_windows: (12, 26, 9),
            kdj_windows: [5, 9, 14],
            wr_windows: [14, 6],
        }
    }
}

impl IndicatorEngine {
    /// Create the engine with the standard windows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute every indicator, returned in [`INDICATOR_NAMES`] order.
    pub fn compute(
        &self,
        high: &[f64],
        low: &[f64],
        close: &[f64],
    ) -> Result<Vec<(String, Vec<f64>)>> {
        if high.len() != close.len() || low.len() != close.len() {
            return Err(Error::data(format!(
                "indicator inputs differ in length: high {}, low {}, close {}",
                high.len(),
                low.len(),
                close.len()
            )));
        }

        let mut columns: Vec<(String, Vec<f64>)> = Vec::with_capacity(INDICATOR_NAMES.len());

        for w in self.sma_windows {
            columns.push((format!("close_{w}_sma"), sma(close, w)));
        }
        for w in self.ema_windows {
            columns.push((format!("close_{w}_ema"), ema(close, w)));
        }
        columns.push((format!("rsi_{}", self.rsi_window), rsi(close, self.rsi_window)));

        for (i, w) in self.boll_windows.iter().enumerate() {
            let (mid, upper, lower) = bollinger(close, *w, self.boll_width);
            // The first window is the unsuffixed default.
            let suffix = if i == 0 { String::new() } else { format!("_{w}") };
            columns.push((format!("boll{suffix}"), mid));
            columns.push((format!("boll_ub{suffix}"), upper));
            columns.push((format!("boll_lb{suffix}"), lower));
        }

        let (fast, slow, signal) = self.macd_windows;
        let (line, signal_line, histogram) = macd(close, fast, slow, signal);
        columns.push(("macd".to_string(), line));
        columns.push(("macds".to_string(), signal_line));
        columns.push(("macdh".to_string(), histogram));

        for w in self.kdj_windows {
            let (k, d) = kdj(high, low, close, w);
            columns.push((format!("kdjk_{w}"), k));
            columns.push((format!("kdjd_{w}"), d));
        }
        for w in self.wr_windows {
            columns.push((format!("wr_{w}"), williams_r(high, low, close, w)));
        }

        Ok(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn series(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let close: Vec<f64> = (0..n)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0 + i as f64 * 0.2)
            .collect();
        let high = close.iter().map(|c| c + 1.5).collect();
        let low = close.iter().map(|c| c - 1.5).collect();
        (high, low, close)
    }

    #[test]
    fn test_names_and_order() {
        let (high, low, close) = series(40);
        let columns = IndicatorEngine::new().compute(&high, &low, &close).unwrap();
        let names: Vec<&str> = columns.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, INDICATOR_NAMES.to_vec());
        for (name, values) in &columns {
            assert_eq!(values.len(), 40, "{name}");
            assert!(values.iter().all(|v| v.is_finite()), "{name}");
        }
    }

    #[test]
    fn test_length_mismatch() {
        let err = IndicatorEngine::new().compute(&[1.0], &[1.0, 2.0], &[1.0]);
        assert!(err.is_err());
    }

    #[test]
    fn test_rsi_bounds() {
        let (_, _, close) = series(60);
        for v in rsi(&close, 14) {
            assert!((0.0..=100.0).contains(&v));
        }
        // Strictly rising prices have no losses.
        let rising: Vec<f64> = (1..=20).map(f64::from).collect();
        assert_relative_eq!(*rsi(&rising, 14).last().unwrap(), 100.0);
        assert_relative_eq!(rsi(&[5.0, 5.0, 5.0], 14)[2], 50.0);
    }

    #[test]
    fn test_bollinger_symmetry() {
        let (_, _, close) = series(30);
        let (mid, upper, lower) = bollinger(&close, 20, 2.0);
        for i in 0..30 {
            assert_relative_eq!(upper[i] - mid[i], mid[i] - lower[i], epsilon = 1e-9);
            assert!(upper[i] >= lower[i]);
        }
    }

    #[test]
    fn test_macd_histogram() {
        let (_, _, close) = series(50);
        let (line, signal, hist) = macd(&close, 12, 26, 9);
        for i in 0..50 {
            assert_relative_eq!(hist[i], line[i] - signal[i], epsilon = 1e-12);
        }
        assert_eq!(line[0], 0.0);
    }

    #[test]
    fn test_kdj_at_high() {
        // Close pinned at the window high drives K and D toward 100.
        let close: Vec<f64> = (1..=60).map(f64::from).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 2.0).collect();
        let (k, d) = kdj(&close, &low, &close, 9);
        assert!(*k.last().unwrap() > 99.0);
        assert!(*d.last().unwrap() > 99.0);
        assert!(k[0] > 50.0);
    }

    #[test]
    fn test_williams_r() {
        let high = [10.0, 12.0, 11.0];
        let low = [8.0, 9.0, 9.5];
        let close = [9.0, 12.0, 10.0];
        let wr = williams_r(&high, &low, &close, 2);
        assert_relative_eq!(wr[0], -50.0);
        assert_relative_eq!(wr[1], 0.0);
        // window rows 1..=2: high 12, low 9
        assert_relative_eq!(wr[2], -200.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_range_is_zero() {
        let flat = [5.0; 4];
        assert_eq!(williams_r(&flat, &flat, &flat, 3), vec![0.0; 4]);
    }
}
