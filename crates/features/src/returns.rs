//! Percentage log returns and binary labels.
//!
//! Returns are always recomputed from the current `Close` column, never
//! updated incrementally, so applying the calculator twice is a no-op.

use pricewave_core::{
    config::ReturnsConfig, Error, FeatureTable, Result, BINARY_LABEL, CLOSE, INFINITY_SENTINEL,
    RETURN,
};
use tracing::debug;

/// Replace every `+inf`/`-inf` cell in the table with the sentinel.
///
/// Returns the number of replaced cells.
pub fn sanitize_infinities(table: &mut FeatureTable) -> usize {
    let mut replaced = 0;
    table.map_values(|v| {
        if v.is_infinite() {
            replaced += 1;
            INFINITY_SENTINEL
        } else {
            v
        }
    });
    replaced
}

/// Computes `return` and `binary_label` from `Close`.
#[derive(Debug, Clone, Default)]
pub struct ReturnCalculator {
    /// Reject non-positive closes up front.
    validate_close: bool,
}

impl ReturnCalculator {
    /// Create a calculator.
    pub fn new(validate_close: bool) -> Self {
        Self { validate_close }
    }

    /// Create a calculator from configuration.
    pub fn from_config(config: &ReturnsConfig) -> Self {
        Self::new(config.validate_close)
    }

    /// Percentage log returns: `100 * (ln c[i] - ln c[i-1])`.
    ///
    /// The first value, and any NaN (e.g. from a negative close), is 0.
    /// Infinite values are left for the table-wide sanitization pass.
    pub fn log_returns(close: &[f64]) -> Vec<f64> {
        let mut returns = Vec::with_capacity(close.len());
        if close.is_empty() {
            return returns;
        }
        returns.push(0.0);
        for pair in close.windows(2) {
            let r = (pair[1].ln() - pair[0].ln()) * 100.0;
            returns.push(if r.is_nan() { 0.0 } else { r });
        }
        returns
    }

    /// Label 1 for a strictly positive return, 0 otherwise (flat is 0).
    pub fn labels(returns: &[f64]) -> Vec<f64> {
        returns
            .iter()
            .map(|&r| if r > 0.0 { 1.0 } else { 0.0 })
            .collect()
    }

    /// Recompute `return` and `binary_label` as the last two columns.
    pub fn apply(&self, table: &FeatureTable) -> Result<FeatureTable> {
        if table.is_empty() {
            return Err(Error::data("cannot compute returns on an empty table"));
        }
        let close = table.values(CLOSE)?;

        if self.validate_close {
            let non_positive = close.iter().filter(|v| v.is_nan() || **v <= 0.0).count();
            if non_positive > 0 {
                return Err(Error::domain(CLOSE, non_positive));
            }
        }

        let mut out = table.clone();
        out.set_column(RETURN, Self::log_returns(close))?;

        let replaced = sanitize_infinities(&mut out);
        if replaced > 0 {
            debug!(replaced, "replaced infinite values");
        }

        let labels = Self::labels(out.values(RETURN)?);
        out.set_column(BINARY_LABEL, labels)?;
        out.move_to_end(RETURN)?;
        out.move_to_end(BINARY_LABEL)?;
        Ok(out)
    }

    /// Recompute labels if `Close` is present.
    ///
    /// Once correlated peers have replaced `Close`, the existing label
    /// columns are kept and only the infinity sanitization runs.
    pub fn refresh(&self, table: &FeatureTable) -> Result<FeatureTable> {
        if table.contains(CLOSE) {
            return self.apply(table);
        }
        if table.contains(RETURN) && table.contains(BINARY_LABEL) {
            let mut out = table.clone();
            sanitize_infinities(&mut out);
            return Ok(out);
        }
        Err(Error::missing_column(CLOSE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn table(close: Vec<f64>) -> FeatureTable {
        let n = close.len();
        FeatureTable::from_columns(vec![("Close", close), ("Open", vec![1.0; n])]).unwrap()
    }

    #[test]
    fn test_three_day_scenario() {
        let out = ReturnCalculator::default()
            .apply(&table(vec![100.0, 105.0, 100.0]))
            .unwrap();
        let r = out.values("return").unwrap();
        assert_eq!(r[0], 0.0);
        assert_relative_eq!(r[1], 100.0 * 1.05f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(r[1], 4.879016416943205, epsilon = 1e-12);
        assert_relative_eq!(r[2], 100.0 * (100.0f64 / 105.0).ln(), epsilon = 1e-12);
        assert_eq!(out.values("binary_label").unwrap(), &[0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_labels_trail() {
        let out = ReturnCalculator::default()
            .apply(&table(vec![1.0, 2.0]))
            .unwrap();
        assert_eq!(
            out.column_names(),
            vec!["Close", "Open", "return", "binary_label"]
        );
    }

    #[test]
    fn test_flat_return_is_down() {
        let out = ReturnCalculator::default()
            .apply(&table(vec![10.0, 10.0, 11.0]))
            .unwrap();
        assert_eq!(out.values("return").unwrap()[1], 0.0);
        assert_eq!(out.values("binary_label").unwrap(), &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_idempotent() {
        let calc = ReturnCalculator::default();
        let once = calc.apply(&table(vec![3.0, 1.0, 4.0, 1.0, 5.0])).unwrap();
        let twice = calc.apply(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_zero_close_sanitized() {
        let out = ReturnCalculator::default()
            .apply(&table(vec![100.0, 0.0, 50.0, 0.0, 0.0]))
            .unwrap();
        let r = out.values("return").unwrap();
        // ln(0) - ln(100) = -inf, ln(50) - ln(0) = +inf, ln(0) - ln(0) = NaN
        assert_eq!(r, &[0.0, INFINITY_SENTINEL, INFINITY_SENTINEL, INFINITY_SENTINEL, 0.0]);
        let labels = out.values("binary_label").unwrap();
        for (label, ret) in labels.iter().zip(r) {
            assert_eq!(*label == 1.0, *ret > 0.0);
        }
        assert!(out.iter().all(|c| c.values.iter().all(|v| !v.is_infinite())));
    }

    #[test]
    fn test_negative_close_returns_zero() {
        let out = ReturnCalculator::default()
            .apply(&table(vec![10.0, -5.0, 10.0]))
            .unwrap();
        assert_eq!(out.values("return").unwrap(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_sanitize_whole_table() {
        let t = FeatureTable::from_columns(vec![
            ("Close", vec![1.0, 2.0]),
            ("feature", vec![f64::INFINITY, f64::NEG_INFINITY]),
        ])
        .unwrap();
        let out = ReturnCalculator::default().apply(&t).unwrap();
        assert_eq!(
            out.values("feature").unwrap(),
            &[INFINITY_SENTINEL, INFINITY_SENTINEL]
        );
    }

    #[test]
    fn test_validate_close() {
        let err = ReturnCalculator::new(true)
            .apply(&table(vec![1.0, 0.0, -2.0]))
            .unwrap_err();
        match err {
            Error::Domain { column, count } => {
                assert_eq!(column, "Close");
                assert_eq!(count, 2);
            }
            other => panic!("expected domain error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_close() {
        let t = FeatureTable::from_columns(vec![("Open", vec![1.0])]).unwrap();
        assert!(matches!(
            ReturnCalculator::default().apply(&t),
            Err(Error::MissingColumn(_))
        ));
        assert!(ReturnCalculator::default().refresh(&t).is_err());
    }

    #[test]
    fn test_refresh_without_close_keeps_labels() {
        let t = FeatureTable::from_columns(vec![
            ("BTC", vec![1.0, f64::INFINITY]),
            ("return", vec![0.0, 2.0]),
            ("binary_label", vec![0.0, 1.0]),
        ])
        .unwrap();
        let out = ReturnCalculator::default().refresh(&t).unwrap();
        assert_eq!(out.values("binary_label").unwrap(), &[0.0, 1.0]);
        assert_eq!(out.values("BTC").unwrap()[1], INFINITY_SENTINEL);
    }

    #[test]
    fn test_single_row() {
        let out = ReturnCalculator::default().apply(&table(vec![42.0])).unwrap();
        assert_eq!(out.values("return").unwrap(), &[0.0]);
        assert_eq!(out.values("binary_label").unwrap(), &[0.0]);
    }
}
