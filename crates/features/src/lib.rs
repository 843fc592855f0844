//! Feature computation for the pricewave pipeline.
//!
//! This crate handles:
//! - Percentage log returns and binary up/down labels
//! - Rolling window primitives (SMA, EMA, rolling std/min/max)
//! - Technical indicators (RSI, Bollinger, MACD, KDJ, Williams %R)
//! - Pairwise correlation of peer price series
//! - Indicator augmentation with optional peer substitution

pub mod augmenter;
pub mod correlation;
pub mod indicators;
pub mod returns;
pub mod rolling;

pub use augmenter::{AugmentOptions, IndicatorAugmenter};
pub use correlation::CorrelationMatrix;
pub use indicators::{IndicatorEngine, INDICATOR_NAMES};
pub use returns::{sanitize_infinities, ReturnCalculator};
