//! Indicator augmentation with optional correlated-peer substitution.

use crate::correlation::CorrelationMatrix;
use crate::indicators::IndicatorEngine;
use pricewave_core::{
    config::AugmentConfig, is_label_column, Error, FeatureTable, Result, CLOSE,
    DEFAULT_CORRELATION_THRESHOLD, HIGH, LOW,
};
use tracing::{debug, info, warn};

/// Options for the augmentation stage.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentOptions {
    /// Replace `Close` with correlated peer prices.
    pub add_correlated: bool,
    /// Absolute correlation a peer must exceed.
    pub correlation_threshold: f64,
}

impl Default for AugmentOptions {
    fn default() -> Self {
        Self {
            add_correlated: false,
            correlation_threshold: DEFAULT_CORRELATION_THRESHOLD,
        }
    }
}

impl From<&AugmentConfig> for AugmentOptions {
    fn from(config: &AugmentConfig) -> Self {
        Self {
            add_correlated: config.add_correlated,
            correlation_threshold: config.correlation_threshold,
        }
    }
}

/// Position just before the first trailing label column.
fn label_position(table: &FeatureTable) -> usize {
    table
        .column_names()
        .iter()
        .position(|n| is_label_column(n))
        .unwrap_or(table.width())
}

/// Appends technical indicators and, optionally, correlated peer prices.
#[derive(Debug, Clone, Default)]
pub struct IndicatorAugmenter {
    options: AugmentOptions,
    engine: IndicatorEngine,
}

impl IndicatorAugmenter {
    /// Create an augmenter.
    pub fn new(options: AugmentOptions) -> Self {
        Self {
            options,
            engine: IndicatorEngine::new(),
        }
    }

    /// Options in use.
    pub fn options(&self) -> &AugmentOptions {
        &self.options
    }

    /// Augment a normalized table.
    ///
    /// Output layout: original columns, indicators, `Close` (or the selected
    /// peers), then any label columns already present.
    pub fn augment(
        &self,
        table: &FeatureTable,
        peers: Option<&FeatureTable>,
    ) -> Result<FeatureTable> {
        let peers = match (self.options.add_correlated, peers) {
            (true, None) => {
                return Err(Error::correlation_input(
                    "correlated prices requested but no peer table supplied",
                ))
            }
            (true, Some(peers)) => Some(peers),
            (false, _) => None,
        };

        let mut out = table.clone();

        // Keep Close directly ahead of the label columns.
        let close = out.remove_column(CLOSE)?;
        let position = label_position(&out);
        out.insert_column(position, CLOSE, close.values)?;

        let indicators = self.engine.compute(
            out.values(HIGH)?,
            out.values(LOW)?,
            out.values(CLOSE)?,
        )?;
        let mut position = out.position(CLOSE).unwrap_or(out.width());
        for (name, values) in indicators {
            out.insert_column(position, name, values)?;
            position += 1;
        }
        debug!(columns = ?out.column_names(), "indicator columns added");

        if let Some(peers) = peers {
            let selected = self.select_correlated(out.values(CLOSE)?, peers)?;
            for name in &selected {
                if out.contains(name) {
                    warn!(peer = %name, "peer column already present, skipping");
                    continue;
                }
                let position = label_position(&out);
                out.insert_column(position, name.clone(), peers.values(name)?.to_vec())?;
            }
            out.remove_column(CLOSE)?;
        }

        Ok(out)
    }

    /// Names of peer columns whose absolute correlation with `close`
    /// exceeds the threshold.
    pub fn select_correlated(&self, close: &[f64], peers: &FeatureTable) -> Result<Vec<String>> {
        if peers.len() != close.len() {
            return Err(Error::correlation_input(format!(
                "peer table has {} rows, expected {}",
                peers.len(),
                close.len()
            )));
        }

        let mut combined = FeatureTable::new();
        for column in peers.iter().filter(|c| c.name != CLOSE) {
            combined.push_column(column.name.clone(), column.values.clone())?;
        }
        combined.push_column(CLOSE, close.to_vec())?;

        let matrix = CorrelationMatrix::from_table(&combined);
        let threshold = self.options.correlation_threshold;
        let selected: Vec<String> = matrix
            .column(CLOSE)
            .unwrap_or_default()
            .into_iter()
            .filter(|(name, r)| *name != CLOSE && r.abs() > threshold)
            .map(|(name, _)| name.to_string())
            .collect();

        info!(threshold, peers = ?selected, "correlated peers above threshold");
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::INDICATOR_NAMES;

    fn normalized(n: usize) -> FeatureTable {
        let close: Vec<f64> = (0..n)
            .map(|i| 100.0 + (i as f64 * 0.5).sin() * 4.0 + i as f64 * 0.3)
            .collect();
        let high: Vec<f64> = close.iter().map(|c| c + 1.0).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 1.0).collect();
        let open: Vec<f64> = close.iter().map(|c| c - 0.2).collect();
        FeatureTable::from_columns(vec![
            ("Close", close),
            ("Open", open),
            ("High", high),
            ("Low", low),
            ("return", vec![0.0; n]),
            ("binary_label", vec![0.0; n]),
        ])
        .unwrap()
    }

    fn peers(close: &[f64]) -> FeatureTable {
        let btc: Vec<f64> = close
            .iter()
            .enumerate()
            .map(|(i, c)| c * 400.0 + if i % 2 == 0 { 150.0 } else { -150.0 })
            .collect();
        let doge: Vec<f64> = (0..close.len())
            .map(|i| if i % 3 == 0 { 0.1 } else { 0.09 })
            .collect();
        FeatureTable::from_columns(vec![("BTC", btc), ("DOGE", doge)]).unwrap()
    }

    #[test]
    fn test_layout() {
        let out = IndicatorAugmenter::default()
            .augment(&normalized(30), None)
            .unwrap();
        let names = out.column_names();
        assert_eq!(&names[..3], &["Open", "High", "Low"]);
        assert_eq!(&names[3..3 + INDICATOR_NAMES.len()], &INDICATOR_NAMES[..]);
        assert_eq!(
            &names[names.len() - 3..],
            &["Close", "return", "binary_label"]
        );
        assert_eq!(out.len(), 30);
    }

    #[test]
    fn test_correlated_peers_replace_close() {
        let table = normalized(40);
        let peer_table = peers(table.values("Close").unwrap());
        let augmenter = IndicatorAugmenter::new(AugmentOptions {
            add_correlated: true,
            correlation_threshold: 0.85,
        });

        let selected = augmenter
            .select_correlated(table.values("Close").unwrap(), &peer_table)
            .unwrap();
        assert_eq!(selected, vec!["BTC".to_string()]);

        let out = augmenter.augment(&table, Some(&peer_table)).unwrap();
        assert!(out.contains("BTC"));
        assert!(!out.contains("DOGE"));
        assert!(!out.contains("Close"));
        assert_eq!(out.values("BTC").unwrap(), peer_table.values("BTC").unwrap());
        let names = out.column_names();
        assert_eq!(&names[names.len() - 3..], &["BTC", "return", "binary_label"]);
    }

    #[test]
    fn test_missing_peer_table() {
        let augmenter = IndicatorAugmenter::new(AugmentOptions {
            add_correlated: true,
            ..AugmentOptions::default()
        });
        assert!(matches!(
            augmenter.augment(&normalized(10), None),
            Err(Error::CorrelationInput(_))
        ));
    }

    #[test]
    fn test_peer_row_mismatch() {
        let augmenter = IndicatorAugmenter::new(AugmentOptions {
            add_correlated: true,
            ..AugmentOptions::default()
        });
        let short = FeatureTable::from_columns(vec![("BTC", vec![1.0, 2.0])]).unwrap();
        assert!(matches!(
            augmenter.augment(&normalized(10), Some(&short)),
            Err(Error::CorrelationInput(_))
        ));
    }

    #[test]
    fn test_peers_ignored_without_flag() {
        let table = normalized(20);
        let peer_table = peers(table.values("Close").unwrap());
        let out = IndicatorAugmenter::default()
            .augment(&table, Some(&peer_table))
            .unwrap();
        assert!(out.contains("Close"));
        assert!(!out.contains("BTC"));
    }

    #[test]
    fn test_missing_close() {
        let table = FeatureTable::from_columns(vec![("Open", vec![1.0])]).unwrap();
        assert!(matches!(
            IndicatorAugmenter::default().augment(&table, None),
            Err(Error::MissingColumn(_))
        ));
    }
}
