//! Columnar table used for the event log and every auxiliary table.
//!
//! Columns keep insertion order and always have the same number of rows.
//! The schema of the auxiliary tables belongs to the trace producer, so the
//! table itself knows nothing about column meaning.

use super::value::Value;
use crate::utils::error::TableError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Named columns of equal length
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct Table {
    pub(super) columns: IndexMap<String, Vec<Value>>,
}

/// Unvalidated wire form; converted through `Table::from_columns`
#[derive(Deserialize)]
struct RawTable {
    columns: IndexMap<String, Vec<Value>>,
}

impl TryFrom<RawTable> for Table {
    type Error = TableError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        Table::from_columns(raw.columns)
    }
}

impl Table {
    /// Create a table with no columns and no rows
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with the given column names
    pub fn with_columns<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: names.into_iter().map(|n| (n.into(), Vec::new())).collect(),
        }
    }

    /// Build a table from complete columns
    ///
    /// # Errors
    /// * `TableError::LengthMismatch` - columns differ in length
    pub fn from_columns<I, S>(columns: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (S, Vec<Value>)>,
        S: Into<String>,
    {
        let columns: IndexMap<String, Vec<Value>> =
            columns.into_iter().map(|(n, v)| (n.into(), v)).collect();

        if let Some(expected) = columns.values().next().map(Vec::len) {
            for (name, values) in &columns {
                if values.len() != expected {
                    return Err(TableError::LengthMismatch {
                        column: name.clone(),
                        expected,
                        found: values.len(),
                    });
                }
            }
        }

        Ok(Self { columns })
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.columns.values().next().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Values of row `index`, in column order
    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        if index >= self.len() {
            return None;
        }
        Some(self.columns.values().map(|c| &c[index]).collect())
    }

    /// Append one row given in column order
    ///
    /// # Errors
    /// * `TableError::RowWidth` - row length differs from the column count
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::RowWidth {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        for (column, value) in self.columns.values_mut().zip(row) {
            column.push(value);
        }
        Ok(())
    }

    /// Add or replace a column holding `value` in every row
    pub fn set_constant_column(&mut self, name: &str, value: Value) {
        let rows = self.len();
        self.columns.insert(name.to_string(), vec![value; rows]);
    }

    /// Rows for which `predicate` holds on `column`
    ///
    /// # Errors
    /// * `TableError::UnknownColumn` - the column does not exist
    pub fn filter_rows<F>(&self, column: &str, predicate: F) -> Result<Table, TableError>
    where
        F: Fn(&Value) -> bool,
    {
        let values = self
            .columns
            .get(column)
            .ok_or_else(|| TableError::UnknownColumn(column.to_string()))?;
        let mask: Vec<bool> = values.iter().map(predicate).collect();
        Ok(self.take_mask(&mask))
    }

    fn take_mask(&self, mask: &[bool]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|(name, values)| {
                let kept = values
                    .iter()
                    .zip(mask)
                    .filter(|(_, keep)| **keep)
                    .map(|(v, _)| v.clone())
                    .collect();
                (name.clone(), kept)
            })
            .collect();
        Table { columns }
    }

    /// Rows `start..end`, clamped to the table
    pub fn slice(&self, start: usize, end: usize) -> Table {
        let end = end.min(self.len());
        let start = start.min(end);
        let columns = self
            .columns
            .iter()
            .map(|(name, values)| (name.clone(), values[start..end].to_vec()))
            .collect();
        Table { columns }
    }

    /// Split into consecutive pieces of at most `rows` rows
    ///
    /// An empty table yields a single empty piece so its columns survive.
    pub fn chunks(&self, rows: usize) -> Vec<Table> {
        let rows = rows.max(1);
        if self.is_empty() {
            return vec![self.clone()];
        }
        (0..self.len())
            .step_by(rows)
            .map(|start| self.slice(start, start + rows))
            .collect()
    }

    /// Stack tables vertically
    ///
    /// Columns are the union of all inputs in order of first appearance;
    /// cells a table does not have are `Value::Null`.
    pub fn concat<'a, I>(tables: I) -> Table
    where
        I: IntoIterator<Item = &'a Table>,
    {
        let tables: Vec<&Table> = tables.into_iter().collect();

        let mut columns: IndexMap<String, Vec<Value>> = IndexMap::new();
        for table in &tables {
            for name in table.columns.keys() {
                columns.entry(name.clone()).or_default();
            }
        }

        for table in &tables {
            let rows = table.len();
            for (name, out) in columns.iter_mut() {
                match table.columns.get(name) {
                    Some(values) => out.extend(values.iter().cloned()),
                    None => out.extend(std::iter::repeat(Value::Null).take(rows)),
                }
            }
        }

        Table { columns }
    }
}
