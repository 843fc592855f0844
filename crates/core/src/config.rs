//! Configuration structures for the pricewave pipeline.
//!
//! `wavelet` and `level` are required; every other section falls back to
//! its default when absent from the document.

use crate::error::{Error, Result};
use crate::types::DEFAULT_CORRELATION_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Wavelet family name (e.g., "db4").
    pub wavelet: String,
    /// Decomposition level.
    pub level: u32,
    /// Return/label configuration.
    #[serde(default)]
    pub returns: ReturnsConfig,
    /// Indicator augmentation configuration.
    #[serde(default)]
    pub augment: AugmentConfig,
    /// Denoising configuration.
    #[serde(default)]
    pub denoise: DenoiseConfig,
}

impl Config {
    /// Create a configuration with default optional sections.
    pub fn new(wavelet: impl Into<String>, level: u32) -> Self {
        Self {
            wavelet: wavelet.into(),
            level,
            returns: ReturnsConfig::default(),
            augment: AugmentConfig::default(),
            denoise: DenoiseConfig::default(),
        }
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.json` is read as JSON, anything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            _ => Self::from_yaml_str(&contents),
        }
    }

    /// Check value ranges.
    ///
    /// The wavelet name itself is resolved by the wavelet crate when the
    /// pipeline is built.
    pub fn validate(&self) -> Result<()> {
        if self.wavelet.trim().is_empty() {
            return Err(Error::config("wavelet must not be empty"));
        }
        if self.level == 0 {
            return Err(Error::config("level must be a positive integer"));
        }
        let threshold = self.augment.correlation_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::config(format!(
                "correlation_threshold must be within [0, 1], got {threshold}"
            )));
        }
        Ok(())
    }
}

/// Return/label computation configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReturnsConfig {
    /// Reject non-positive closes instead of sanitizing infinite returns.
    pub validate_close: bool,
}

/// Indicator augmentation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AugmentConfig {
    /// Substitute correlated peer prices for the own close.
    pub add_correlated: bool,
    /// Absolute correlation a peer must exceed.
    pub correlation_threshold: f64,
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            add_correlated: false,
            correlation_threshold: DEFAULT_CORRELATION_THRESHOLD,
        }
    }
}

/// Denoising configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DenoiseConfig {
    /// Run the wavelet denoiser.
    pub enabled: bool,
}

impl Default for DenoiseConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_minimal() {
        let config = Config::from_yaml_str("wavelet: db4\nlevel: 2\n").unwrap();
        assert_eq!(config.wavelet, "db4");
        assert_eq!(config.level, 2);
        assert!(!config.returns.validate_close);
        assert!(!config.augment.add_correlated);
        assert_eq!(config.augment.correlation_threshold, 0.85);
        assert!(config.denoise.enabled);
    }

    #[test]
    fn test_yaml_sections() {
        let yaml = "wavelet: haar
level: 3
augment:
  add_correlated: true
  correlation_threshold: 0.9
";
        let config = Config::from_yaml_str(yaml).unwrap();
        assert!(config.augment.add_correlated);
        assert_eq!(config.augment.correlation_threshold, 0.9);
    }

    #[test]
    fn test_missing_wavelet() {
        assert!(matches!(
            Config::from_yaml_str("level: 2\n"),
            Err(Error::Yaml(_))
        ));
    }

    #[test]
    fn test_missing_level() {
        assert!(matches!(
            Config::from_json_str(r#"{"wavelet": "db4"}"#),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_zero_level_rejected() {
        assert!(matches!(
            Config::from_yaml_str("wavelet: db4\nlevel: 0\n"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_threshold_range() {
        let mut config = Config::new("db4", 2);
        config.augment.correlation_threshold = 1.5;
        assert!(config.validate().is_err());
    }
}
