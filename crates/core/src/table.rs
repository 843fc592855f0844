//! Column-oriented feature table.
//!
//! Columns are kept in insertion order with an O(1) name index. Every
//! mutator enforces that all columns (and the optional date index) have the
//! same number of rows.

use crate::error::{Error, Result};
use crate::types::is_label_column;
use chrono::NaiveDate;
use std::collections::HashMap;

/// A named numeric series.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Values, one per row.
    pub values: Vec<f64>,
}

impl Column {
    /// Create a new column.
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Ordered set of equal-length numeric columns with an optional date index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    columns: Vec<Column>,
    index: HashMap<String, usize>,
    dates: Option<Vec<NaiveDate>>,
    rows: usize,
}

impl FeatureTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, values)` pairs, in order.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<f64>)>) -> Result<Self> {
        let mut table = Self::new();
        for (name, values) in columns {
            table.push_column(name, values)?;
        }
        Ok(table)
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Whether the table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Names of every column except the trailing label columns.
    pub fn feature_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| !is_label_column(&c.name))
            .map(|c| c.name.clone())
            .collect()
    }

    /// Whether a column exists.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Position of a column.
    #[inline]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.position(name).map(|i| &self.columns[i])
    }

    /// Values of a column, or a missing column error.
    pub fn values(&self, name: &str) -> Result<&[f64]> {
        self.column(name)
            .map(|c| c.values.as_slice())
            .ok_or_else(|| Error::missing_column(name))
    }

    /// Iterate over columns in order.
    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// Append a column.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let position = self.columns.len();
        self.insert_column(position, name, values)
    }

    /// Insert a column at `position` (clamped to the table width).
    pub fn insert_column(
        &mut self,
        position: usize,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(Error::data(format!("duplicate column '{name}'")));
        }
        self.check_length(&name, values.len())?;
        let position = position.min(self.columns.len());
        self.columns.insert(position, Column::new(name, values));
        self.rebuild_index();
        Ok(())
    }

    /// Remove a column and return it.
    pub fn remove_column(&mut self, name: &str) -> Result<Column> {
        let position = self
            .position(name)
            .ok_or_else(|| Error::missing_column(name))?;
        let column = self.columns.remove(position);
        self.rebuild_index();
        if self.columns.is_empty() && self.dates.is_none() {
            self.rows = 0;
        }
        Ok(column)
    }

    /// Replace an existing column's values, or append a new column.
    pub fn set_column(&mut self, name: &str, values: Vec<f64>) -> Result<()> {
        if self.contains(name) {
            self.replace_values(name, values)
        } else {
            self.push_column(name, values)
        }
    }

    /// Replace the values of an existing column in place.
    pub fn replace_values(&mut self, name: &str, values: Vec<f64>) -> Result<()> {
        let position = self
            .position(name)
            .ok_or_else(|| Error::missing_column(name))?;
        if values.len() != self.rows {
            return Err(Error::data(format!(
                "column '{}' has {} values, table has {} rows",
                name,
                values.len(),
                self.rows
            )));
        }
        self.columns[position].values = values;
        Ok(())
    }

    /// Move a column to the last position.
    pub fn move_to_end(&mut self, name: &str) -> Result<()> {
        let position = self
            .position(name)
            .ok_or_else(|| Error::missing_column(name))?;
        let column = self.columns.remove(position);
        self.columns.push(column);
        self.rebuild_index();
        Ok(())
    }

    /// Reverse the row order of every column and of the date index.
    pub fn reverse_rows(&mut self) {
        for column in &mut self.columns {
            column.values.reverse();
        }
        if let Some(dates) = &mut self.dates {
            dates.reverse();
        }
    }

    /// Apply `f` to every cell of every column.
    pub fn map_values(&mut self, mut f: impl FnMut(f64) -> f64) {
        for column in &mut self.columns {
            for value in &mut column.values {
                *value = f(*value);
            }
        }
    }

    /// Row index dates, if any.
    pub fn dates(&self) -> Option<&[NaiveDate]> {
        self.dates.as_deref()
    }

    /// Attach a date index.
    pub fn set_dates(&mut self, dates: Vec<NaiveDate>) -> Result<()> {
        if !self.columns.is_empty() && dates.len() != self.rows {
            return Err(Error::data(format!(
                "date index has {} entries, table has {} rows",
                dates.len(),
                self.rows
            )));
        }
        self.rows = dates.len();
        self.dates = Some(dates);
        Ok(())
    }

    fn check_length(&mut self, name: &str, len: usize) -> Result<()> {
        if self.columns.is_empty() && self.dates.is_none() {
            self.rows = len;
            return Ok(());
        }
        if len != self.rows {
            return Err(Error::data(format!(
                "column '{}' has {} values, table has {} rows",
                name, len, self.rows
            )));
        }
        Ok(())
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();
    }
}
