//! CSV output for feature tables.

use pricewave_core::{FeatureTable, Result, DATE};
use std::io::Write;
use std::path::Path;

/// Write a table as CSV, with the date index first when present.
pub fn write_csv<W: Write>(table: &FeatureTable, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    let dates = table.dates();

    let mut header: Vec<&str> = Vec::with_capacity(table.width() + 1);
    if dates.is_some() {
        header.push(DATE);
    }
    header.extend(table.column_names());
    writer.write_record(&header)?;

    for row in 0..table.len() {
        let mut record: Vec<String> = Vec::with_capacity(header.len());
        if let Some(dates) = dates {
            record.push(dates[row].format("%Y-%m-%d").to_string());
        }
        record.extend(table.iter().map(|c| c.values[row].to_string()));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a table to a CSV file.
pub fn write_csv_path(table: &FeatureTable, path: impl AsRef<Path>) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(table, file)
}
