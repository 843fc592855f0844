//! Feature table pipeline for the pricewave system.
//!
//! This crate provides:
//! - Wavelet denoising of feature columns
//! - The stage orchestrator (normalize, augment, denoise)

pub mod denoiser;
pub mod pipeline;

pub use denoiser::Denoiser;
pub use pipeline::Pipeline;
