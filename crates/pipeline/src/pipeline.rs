//! Stage orchestration.
//!
//! Each stage takes the previous table by reference and returns a new one.
//! Returns and labels are recomputed here, after every stage that changes
//! `Close` or the column set.

use crate::denoiser::Denoiser;
use pricewave_core::{Config, FeatureTable, Result};
use pricewave_features::{AugmentOptions, IndicatorAugmenter, ReturnCalculator};
use pricewave_ingestion::{ColumnNormalizer, RawTable};
use tracing::info;

/// Raw prices to labeled, denoised feature table.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: Config,
    normalizer: ColumnNormalizer,
    returns: ReturnCalculator,
    augmenter: IndicatorAugmenter,
    denoiser: Denoiser,
}

impl Pipeline {
    /// Build a pipeline, validating the configuration and wavelet.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let denoiser = Denoiser::from_config(&config)?;
        info!(wavelet = %config.wavelet, level = config.level, "pipeline configured");

        Ok(Self {
            normalizer: ColumnNormalizer::new(),
            returns: ReturnCalculator::from_config(&config.returns),
            augmenter: IndicatorAugmenter::new(AugmentOptions::from(&config.augment)),
            denoiser,
            config,
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Normalize raw prices and compute returns/labels.
    pub fn create_ohlc_data(&self, raw: &RawTable) -> Result<FeatureTable> {
        let table = self.normalizer.normalize(raw)?;
        self.returns.apply(&table)
    }

    /// Add indicators (and correlated peers, if configured), then refresh
    /// returns/labels.
    pub fn create_ti_data(
        &self,
        table: &FeatureTable,
        peers: Option<&FeatureTable>,
    ) -> Result<FeatureTable> {
        let augmented = self.augmenter.augment(table, peers)?;
        self.refresh_after_augment(augmented)
    }

    /// Like [`Pipeline::create_ti_data`] with explicit augmentation options.
    pub fn create_ti_data_with(
        &self,
        table: &FeatureTable,
        options: AugmentOptions,
        peers: Option<&FeatureTable>,
    ) -> Result<FeatureTable> {
        let augmented = IndicatorAugmenter::new(options).augment(table, peers)?;
        self.refresh_after_augment(augmented)
    }

    fn refresh_after_augment(&self, augmented: FeatureTable) -> Result<FeatureTable> {
        info!(columns = augmented.width(), "technical indicators added");
        self.returns.refresh(&augmented)
    }

    /// Denoise every feature column, refreshing returns/labels after each.
    pub fn create_dwt_data(&self, table: &FeatureTable) -> Result<FeatureTable> {
        let mut current = table.clone();
        for name in table.feature_names() {
            current = self.denoiser.denoise_column(&current, &name)?;
            current = self.returns.refresh(&current)?;
        }
        info!(
            wavelet = %self.config.wavelet,
            level = self.config.level,
            "feature columns denoised"
        );
        Ok(current)
    }

    /// Run every stage in order.
    pub fn run(&self, raw: &RawTable, peers: Option<&FeatureTable>) -> Result<FeatureTable> {
        let table = self.create_ohlc_data(raw)?;
        let table = self.create_ti_data(&table, peers)?;
        if self.config.denoise.enabled {
            self.create_dwt_data(&table)
        } else {
            Ok(table)
        }
    }
}
