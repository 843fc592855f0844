//! Shared column names and constants.

/// Raw input name of the closing price.
pub const PRICE: &str = "Price";
/// Canonical closing price column.
pub const CLOSE: &str = "Close";
/// Opening price column.
pub const OPEN: &str = "Open";
/// High price column.
pub const HIGH: &str = "High";
/// Low price column.
pub const LOW: &str = "Low";
/// Raw volume column (dropped during normalization).
pub const VOLUME: &str = "Vol.";
/// Raw daily change column (dropped during normalization).
pub const CHANGE_PCT: &str = "Change %";
/// Raw date column (becomes the row index).
pub const DATE: &str = "Date";

/// Percentage log-return column.
pub const RETURN: &str = "return";
/// Up/down label column.
pub const BINARY_LABEL: &str = "binary_label";

/// Columns that always trail the table.
pub const LABEL_COLUMNS: [&str; 2] = [RETURN, BINARY_LABEL];

/// Replacement for any infinite cell in the table.
pub const INFINITY_SENTINEL: f64 = 1e-6;

/// Default absolute correlation a peer must exceed to be substituted.
pub const DEFAULT_CORRELATION_THRESHOLD: f64 = 0.85;

/// Whether a column name is one of the trailing label columns.
#[inline]
pub fn is_label_column(name: &str) -> bool {
    LABEL_COLUMNS.contains(&name)
}
