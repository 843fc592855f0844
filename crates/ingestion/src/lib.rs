//! Data ingestion and normalization for the pricewave pipeline.
//!
//! This crate handles:
//! - Reading raw price exports (string cells, newest-first)
//! - Column normalization into a chronological OHLC table
//! - Writing feature tables back out as CSV

pub mod export;
pub mod normalizer;
pub mod raw;

pub use export::{write_csv, write_csv_path};
pub use normalizer::ColumnNormalizer;
pub use raw::RawTable;
