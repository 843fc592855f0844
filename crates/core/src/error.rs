//! Error types for the pricewave pipeline.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the pricewave pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// A price field could not be parsed as a number.
    #[error("Parse error in column '{column}' at row {row}: {value:?} is not numeric")]
    Parse {
        column: String,
        row: usize,
        value: String,
    },

    /// Non-positive values feeding a logarithm.
    #[error("Domain error in column '{column}': {count} non-positive value(s)")]
    Domain { column: String, count: usize },

    /// Correlated prices requested without a usable peer table.
    #[error("Correlation input error: {0}")]
    CorrelationInput(String),

    /// Too few samples for the requested decomposition level.
    ///
    /// `column` is set when the signal came from a named table column.
    #[error(
        "Wavelet level error{}: level {level} needs more than {len} samples \
         (max level {max_level})",
        column_context(.column)
    )]
    WaveletLevel {
        column: Option<String>,
        level: u32,
        max_level: u32,
        len: usize,
    },

    /// Wavelet family not known to the filter bank.
    #[error("Unknown wavelet: {0}")]
    UnknownWavelet(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required column is absent.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Data error (invalid shape or content).
    #[error("Data error: {0}")]
    Data(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// YAML serialization/deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn column_context(column: &Option<String>) -> String {
    column
        .as_ref()
        .map(|c| format!(" in column '{c}'"))
        .unwrap_or_default()
}

impl Error {
    /// Create a parse error.
    pub fn parse(column: impl Into<String>, row: usize, value: impl Into<String>) -> Self {
        Error::Parse {
            column: column.into(),
            row,
            value: value.into(),
        }
    }

    /// Create a domain error.
    pub fn domain(column: impl Into<String>, count: usize) -> Self {
        Error::Domain {
            column: column.into(),
            count,
        }
    }

    /// Create a correlation input error.
    pub fn correlation_input(msg: impl Into<String>) -> Self {
        Error::CorrelationInput(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a missing column error.
    pub fn missing_column(name: impl Into<String>) -> Self {
        Error::MissingColumn(name.into())
    }

    /// Create a data error.
    pub fn data(msg: impl Into<String>) -> Self {
        Error::Data(msg.into())
    }
}
