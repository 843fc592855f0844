//! Discrete wavelet transform for the pricewave pipeline.
//!
//! This crate provides:
//! - Orthogonal filter banks (Haar, Daubechies, Symlets)
//! - Single and multilevel DWT with symmetric boundary extension
//! - Coefficient thresholding

pub mod filters;
pub mod threshold;
pub mod transform;

pub use filters::Wavelet;
pub use threshold::{threshold, universal_threshold, ThresholdMode};
pub use transform::{dwt, dwt_coeff_len, idwt, max_level, wavedec, waverec};
