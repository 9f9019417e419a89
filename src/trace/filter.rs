//! Event filter expressions.
//!
//! Grammar: `<column><op><operand>` where `<op>` is `==` or `!=`. An operand
//! starting with `.` names a scalar of the trace itself (a computed field
//! such as `.event_count`, or a metadata key such as `.start_time`); any
//! other operand is a literal. References never execute code: they go
//! through the trace's two-tier lookup only.

use super::container::{Attribute, Trace};
use crate::table::{Table, Value};
use crate::utils::error::FilterError;
use std::str::FromStr;

/// Marker that turns an operand into a reference
const REFERENCE_MARKER: char = '.';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Ne,
}

impl Comparator {
    fn token(self) -> &'static str {
        match self {
            Comparator::Eq => "==",
            Comparator::Ne => "!=",
        }
    }
}

/// Right-hand side of a filter
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Literal(Value),
    Reference(String),
}

/// One parsed `column==value` expression
#[derive(Debug, Clone, PartialEq)]
pub struct EventFilter {
    pub column: String,
    pub comparator: Comparator,
    pub operand: Operand,
}

impl FromStr for EventFilter {
    type Err = FilterError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let malformed = || FilterError::Malformed(text.to_string());

        let (comparator, column, operand) = [Comparator::Eq, Comparator::Ne]
            .into_iter()
            .find_map(|c| text.split_once(c.token()).map(|(k, v)| (c, k, v)))
            .ok_or_else(malformed)?;

        // exactly one comparator per expression
        let has_operator = |s: &str| s.contains("==") || s.contains("!=");
        if has_operator(column) || has_operator(operand) {
            return Err(malformed());
        }

        let column = column.trim();
        if column.is_empty() {
            return Err(malformed());
        }

        let operand = operand.trim();
        let operand = match operand.strip_prefix(REFERENCE_MARKER) {
            Some(name) if is_identifier(name) => Operand::Reference(name.to_string()),
            Some(_) => return Err(malformed()),
            None => Operand::Literal(Value::parse_literal(operand)),
        };

        Ok(Self {
            column: column.to_string(),
            comparator,
            operand,
        })
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

impl EventFilter {
    /// Value the column is compared against
    ///
    /// # Errors
    /// * `FilterError::Metadata` - reference names nothing on the trace
    /// * `FilterError::NotScalar` - reference names a table
    pub fn resolve(&self, trace: &Trace) -> Result<Value, FilterError> {
        match &self.operand {
            Operand::Literal(value) => Ok(value.clone()),
            Operand::Reference(name) => match trace.attr(name)? {
                Attribute::Value(value) => Ok(value),
                _ => Err(FilterError::NotScalar(name.clone())),
            },
        }
    }

    /// Rows of `table` that satisfy this filter
    pub fn apply(&self, table: &Table, trace: &Trace) -> Result<Table, FilterError> {
        let target = self.resolve(trace)?;
        let filtered = match self.comparator {
            Comparator::Eq => table.filter_rows(&self.column, |v| v.matches(&target))?,
            Comparator::Ne => table.filter_rows(&self.column, |v| !v.matches(&target))?,
        };
        Ok(filtered)
    }
}
