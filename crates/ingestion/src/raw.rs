//! Raw string-celled tables as exported by price-history sites.

use crate::normalizer::{parse_date, parse_number};
use pricewave_core::{Error, FeatureTable, Result, DATE};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// A table of unparsed cells, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Create a raw table, checking every row against the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != headers.len())
        {
            return Err(Error::data(format!(
                "row {} has {} cells, expected {}",
                i,
                row.len(),
                headers.len()
            )));
        }
        Ok(Self { headers, rows })
    }

    /// Build from `(header, cells)` column pairs.
    pub fn from_columns<H, C>(columns: Vec<(H, Vec<C>)>) -> Result<Self>
    where
        H: Into<String>,
        C: Into<String>,
    {
        let height = columns.first().map(|(_, c)| c.len()).unwrap_or(0);
        let mut headers = Vec::with_capacity(columns.len());
        let mut rows: Vec<Vec<String>> = vec![Vec::with_capacity(columns.len()); height];
        for (header, cells) in columns {
            let header = header.into();
            if cells.len() != height {
                return Err(Error::data(format!(
                    "column '{}' has {} cells, expected {}",
                    header,
                    cells.len(),
                    height
                )));
            }
            for (row, cell) in rows.iter_mut().zip(cells) {
                row.push(cell.into());
            }
            headers.push(header);
        }
        Self::new(headers, rows)
    }

    /// Read a CSV document with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        debug!(columns = ?headers, rows = rows.len(), "read raw table");
        Self::new(headers, rows)
    }

    /// Read a CSV file with a header row.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Column headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a header.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cells of a column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let i = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[i].as_str()).collect())
    }

    /// Parse every column as numeric, keeping file row order.
    ///
    /// A `Date` column becomes the date index. Used for peer price tables,
    /// which are expected to be chronological already.
    pub fn into_numeric_table(self) -> Result<FeatureTable> {
        let mut table = FeatureTable::new();
        for (i, header) in self.headers.iter().enumerate() {
            let cells = self.rows.iter().map(|row| row[i].as_str());
            if header == DATE {
                let dates = cells
                    .enumerate()
                    .map(|(row, cell)| parse_date(header, row, cell))
                    .collect::<Result<Vec<_>>>()?;
                table.set_dates(dates)?;
            } else {
                let values = cells
                    .enumerate()
                    .map(|(row, cell)| parse_number(header, row, cell))
                    .collect::<Result<Vec<_>>>()?;
                table.push_column(header.clone(), values)?;
            }
        }
        Ok(table)
    }
}
