//! Pairwise Pearson correlation between table columns.

use pricewave_core::FeatureTable;
use statrs::statistics::Statistics;

/// Pearson correlation over rows where both values are finite.
///
/// NaN when fewer than two such rows exist or either side is constant.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y)
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(a, b)| (*a, *b))
        .unzip();
    if xs.len() < 2 {
        return f64::NAN;
    }
    let sx = xs.iter().std_dev();
    let sy = ys.iter().std_dev();
    if sx == 0.0 || sy == 0.0 {
        return f64::NAN;
    }
    xs.iter().covariance(ys.iter()) / (sx * sy)
}

/// Full pairwise correlation matrix of a table's columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    names: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Correlate every column of `table` with every other.
    pub fn from_table(table: &FeatureTable) -> Self {
        let columns: Vec<_> = table.iter().collect();
        let n = columns.len();
        let mut values = vec![vec![f64::NAN; n]; n];
        for i in 0..n {
            for j in i..n {
                let r = pearson(&columns[i].values, &columns[j].values);
                values[i][j] = r;
                values[j][i] = r;
            }
        }
        Self {
            names: columns.iter().map(|c| c.name.clone()).collect(),
            values,
        }
    }

    /// Column names, in matrix order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Correlation between two named columns.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.names.iter().position(|n| n == a)?;
        let j = self.names.iter().position(|n| n == b)?;
        Some(self.values[i][j])
    }

    /// Correlations of one column against every column (itself included).
    pub fn column(&self, name: &str) -> Option<Vec<(&str, f64)>> {
        let i = self.names.iter().position(|n| n == name)?;
        Some(
            self.names
                .iter()
                .map(String::as_str)
                .zip(self.values[i].iter().copied())
                .collect(),
        )
    }
}
