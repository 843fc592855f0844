//! Column normalization.
//!
//! Turns a newest-first raw export into a chronological table with numeric
//! `Close`, `Open`, `High`, `Low` columns.

use crate::raw::RawTable;
use chrono::NaiveDate;
use pricewave_core::{
    Error, FeatureTable, Result, CHANGE_PCT, CLOSE, DATE, HIGH, LOW, OPEN, PRICE, VOLUME,
};
use tracing::{debug, info, warn};

/// Date layouts accepted for the `Date` column.
const DATE_FORMATS: [&str; 3] = ["%m/%d/%Y", "%Y-%m-%d", "%b %d, %Y"];

/// Raw columns that are discarded.
const DROPPED_COLUMNS: [&str; 2] = [VOLUME, CHANGE_PCT];

/// Parse a numeric cell after removing thousands separators.
pub(crate) fn parse_number(column: &str, row: usize, cell: &str) -> Result<f64> {
    let cleaned: String = cell.chars().filter(|c| *c != ',').collect();
    cleaned
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::parse(column, row, cell))
}

/// Parse a date cell in one of the accepted layouts.
pub(crate) fn parse_date(column: &str, row: usize, cell: &str) -> Result<NaiveDate> {
    let cell_trimmed = cell.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(cell_trimmed, fmt).ok())
        .ok_or_else(|| Error::parse(column, row, cell))
}

/// Normalizes raw price exports into canonical OHLC tables.
#[derive(Debug, Clone, Default)]
pub struct ColumnNormalizer;

impl ColumnNormalizer {
    /// Create a new normalizer.
    pub fn new() -> Self {
        Self
    }

    /// Normalize a raw table.
    ///
    /// Output columns are `Close, Open, High, Low` followed by any other
    /// remaining column, rows oldest-first. Row numbers in parse errors
    /// refer to the raw (newest-first) order.
    pub fn normalize(&self, raw: &RawTable) -> Result<FeatureTable> {
        debug!(columns = ?raw.headers(), "initial raw columns");

        for required in [PRICE, OPEN, HIGH, LOW] {
            if raw.column_index(required).is_none() {
                return Err(Error::missing_column(required));
            }
        }

        let mut table = FeatureTable::new();
        for (source, target) in [(PRICE, CLOSE), (OPEN, OPEN), (HIGH, HIGH), (LOW, LOW)] {
            let values = self.parse_column(raw, source, target)?;
            table.push_column(target, values)?;
        }

        for header in raw.headers() {
            let header = header.as_str();
            if [PRICE, OPEN, HIGH, LOW].contains(&header) || DROPPED_COLUMNS.contains(&header) {
                continue;
            }
            if header == DATE {
                let cells = raw.column(DATE).unwrap_or_default();
                let dates = cells
                    .into_iter()
                    .enumerate()
                    .map(|(row, cell)| parse_date(DATE, row, cell))
                    .collect::<Result<Vec<_>>>()?;
                table.set_dates(dates)?;
            } else {
                match self.parse_column(raw, header, header) {
                    Ok(values) => table.push_column(header, values)?,
                    Err(Error::Parse { row, value, .. }) => {
                        warn!(column = header, row, value = %value, "skipping non-numeric column");
                    }
                    Err(err) => return Err(err),
                }
            }
        }

        table.reverse_rows();

        info!(rows = table.len(), columns = ?table.column_names(), "normalized OHLC table");
        Ok(table)
    }

    fn parse_column(&self, raw: &RawTable, source: &str, target: &str) -> Result<Vec<f64>> {
        let cells = raw
            .column(source)
            .ok_or_else(|| Error::missing_column(source))?;
        cells
            .into_iter()
            .enumerate()
            .map(|(row, cell)| parse_number(target, row, cell))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn raw() -> RawTable {
        RawTable::from_columns(vec![
            ("Date", vec!["01/03/2024", "01/02/2024", "01/01/2024"]),
            ("Price", vec!["1,100.5", "1,050.0", "1,000.0"]),
            ("Open", vec!["1,050.0", "1,000.0", "990.0"]),
            ("High", vec!["1,120.0", "1,060.0", "1,010.0"]),
            ("Low", vec!["1,040.0", "995.0", "985.0"]),
            ("Vol.", vec!["1.2K", "1.1K", "0.9K"]),
            ("Change %", vec!["4.81%", "5.00%", "0.00%"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_columns_renamed_and_dropped() {
        let table = ColumnNormalizer::new().normalize(&raw()).unwrap();
        assert_eq!(table.column_names(), vec!["Close", "Open", "High", "Low"]);
        assert!(!table.contains("Price"));
        assert!(!table.contains("Vol."));
        assert!(!table.contains("Change %"));
    }

    #[test]
    fn test_rows_reversed() {
        let table = ColumnNormalizer::new().normalize(&raw()).unwrap();
        assert_eq!(table.values("Close").unwrap(), &[1000.0, 1050.0, 1100.5]);
        assert_relative_eq!(table.values("Low").unwrap()[0], 985.0);
        let dates = table.dates().unwrap();
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(dates[2], NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    }

    #[test]
    fn test_non_numeric_price() {
        let raw = RawTable::from_columns(vec![
            ("Price", vec!["100", "n/a"]),
            ("Open", vec!["100", "100"]),
            ("High", vec!["100", "100"]),
            ("Low", vec!["100", "100"]),
        ])
        .unwrap();
        match ColumnNormalizer::new().normalize(&raw) {
            Err(Error::Parse { column, row, value }) => {
                assert_eq!(column, "Close");
                assert_eq!(row, 1);
                assert_eq!(value, "n/a");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_price_column() {
        let raw = RawTable::from_columns(vec![
            ("Open", vec!["100"]),
            ("High", vec!["100"]),
            ("Low", vec!["100"]),
        ])
        .unwrap();
        assert!(matches!(
            ColumnNormalizer::new().normalize(&raw),
            Err(Error::MissingColumn(_))
        ));
    }

    #[test]
    fn test_extra_numeric_column_kept() {
        let raw = RawTable::from_columns(vec![
            ("Price", vec!["2", "1"]),
            ("Open", vec!["2", "1"]),
            ("High", vec!["2", "1"]),
            ("Low", vec!["2", "1"]),
            ("Funding", vec!["0.01", "0.02"]),
        ])
        .unwrap();
        let table = ColumnNormalizer::new().normalize(&raw).unwrap();
        assert_eq!(table.column_names(), vec!["Close", "Open", "High", "Low", "Funding"]);
        assert_eq!(table.values("Funding").unwrap(), &[0.02, 0.01]);
        assert!(table.dates().is_none());
    }

    #[test]
    fn test_text_column_skipped() {
        let raw = RawTable::from_columns(vec![
            ("Price", vec!["2", "1"]),
            ("Open", vec!["2", "1"]),
            ("High", vec!["2", "1"]),
            ("Low", vec!["2", "1"]),
            ("Symbol", vec!["BTC", "BTC"]),
            ("Funding", vec!["0.01", "0.02"]),
        ])
        .unwrap();
        let table = ColumnNormalizer::new().normalize(&raw).unwrap();
        assert_eq!(
            table.column_names(),
            vec!["Close", "Open", "High", "Low", "Funding"]
        );
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_parse_number_strips_separators() {
        assert_eq!(parse_number("Close", 0, " 12,345.5 ").unwrap(), 12345.5);
        assert!(parse_number("Close", 0, "").is_err());
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 21).unwrap();
        assert_eq!(parse_date("Date", 0, "03/21/2024").unwrap(), expected);
        assert_eq!(parse_date("Date", 0, "2024-03-21").unwrap(), expected);
        assert_eq!(parse_date("Date", 0, "Mar 21, 2024").unwrap(), expected);
        assert!(parse_date("Date", 0, "yesterday").is_err());
    }
}
