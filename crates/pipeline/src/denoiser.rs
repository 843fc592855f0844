//! Wavelet shrinkage denoising.
//!
//! Each column is decomposed, every band (approximation included) is
//! soft-thresholded with the universal threshold of the finest detail
//! band, and the signal is reconstructed at its original length.

use pricewave_core::{Config, Error, FeatureTable, Result};
use pricewave_wavelet::{
    max_level, threshold, universal_threshold, wavedec, waverec, ThresholdMode, Wavelet,
};
use tracing::{debug, warn};

/// Denoises feature columns with a fixed wavelet and level.
#[derive(Debug, Clone)]
pub struct Denoiser {
    wavelet: Wavelet,
    level: u32,
    mode: ThresholdMode,
}

impl Denoiser {
    /// Create a soft-thresholding denoiser.
    pub fn new(wavelet: Wavelet, level: u32) -> Self {
        Self {
            wavelet,
            level,
            mode: ThresholdMode::Soft,
        }
    }

    /// Resolve the configured wavelet.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Wavelet::from_name(&config.wavelet)?, config.level))
    }

    /// Wavelet in use.
    pub fn wavelet(&self) -> &Wavelet {
        &self.wavelet
    }

    /// Decomposition level.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Denoise one series. `column` is only used for diagnostics.
    pub fn denoise_values(&self, column: &str, values: &[f64]) -> Result<Vec<f64>> {
        let len = values.len();
        let max = max_level(len);
        if self.level > max {
            return Err(Error::WaveletLevel {
                column: Some(column.to_string()),
                level: self.level,
                max_level: max,
                len,
            });
        }

        let coeffs = wavedec(values, &self.wavelet, self.level)?;
        let finest = coeffs.last().map(Vec::as_slice).unwrap_or_default();
        let value = universal_threshold(finest, len);
        debug!(column, threshold = value, "universal threshold");

        let shrunk: Vec<Vec<f64>> = coeffs
            .iter()
            .map(|band| threshold(band, value, self.mode))
            .collect();
        let mut denoised = waverec(&shrunk, &self.wavelet)?;

        // Odd lengths reconstruct with one extra trailing sample.
        if denoised.len() != len {
            warn!(
                column,
                original = len,
                denoised = denoised.len(),
                "length mismatch after reconstruction"
            );
            denoised.truncate(len);
        }
        Ok(denoised)
    }

    /// Return a copy of `table` with one column denoised in place.
    pub fn denoise_column(&self, table: &FeatureTable, name: &str) -> Result<FeatureTable> {
        let denoised = self.denoise_values(name, table.values(name)?)?;
        let mut out = table.clone();
        out.replace_values(name, denoised)?;
        Ok(out)
    }
}
