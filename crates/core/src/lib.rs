//! Core types and configuration for the pricewave pipeline.
//!
//! This crate provides shared types used across all other crates:
//! - The column-oriented feature table
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod table;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use table::{Column, FeatureTable};
pub use types::*;
