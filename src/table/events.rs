//! Typed view of one event row.

use super::columns::Table;
use super::value::Value;
use crate::utils::config::BASIC_EVENT_COLUMNS;
use crate::utils::error::TableError;

/// One event as the producer records it
///
/// Field order follows `BASIC_EVENT_COLUMNS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventRecord {
    pub node_id: i64,
    pub thread_id: i64,
    pub handle_id: i64,
    pub event_type: i64,
    pub begin: i64,
    pub end: i64,
    pub duration: i64,
    pub flags: i64,
    pub id: i64,
}

impl EventRecord {
    /// Event spanning `begin..end`; duration is derived
    pub fn new(node_id: i64, thread_id: i64, event_type: i64, begin: i64, end: i64) -> Self {
        Self {
            node_id,
            thread_id,
            event_type,
            begin,
            end,
            duration: end - begin,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    fn to_row(self) -> Vec<Value> {
        [
            self.node_id,
            self.thread_id,
            self.handle_id,
            self.event_type,
            self.begin,
            self.end,
            self.duration,
            self.flags,
            self.id,
        ]
        .into_iter()
        .map(Value::Int)
        .collect()
    }
}

impl Table {
    /// Empty event log with the basic event columns
    pub fn events() -> Self {
        Table::with_columns(BASIC_EVENT_COLUMNS)
    }

    /// Event log holding `records`
    pub fn from_events<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a EventRecord>,
    {
        let mut columns: Vec<Vec<Value>> = vec![Vec::new(); BASIC_EVENT_COLUMNS.len()];
        for record in records {
            for (column, value) in columns.iter_mut().zip(record.to_row()) {
                column.push(value);
            }
        }

        Table {
            columns: BASIC_EVENT_COLUMNS
                .iter()
                .map(|name| name.to_string())
                .zip(columns)
                .collect(),
        }
    }

    /// Append one event; the table must have exactly the basic columns
    ///
    /// # Errors
    /// * `TableError::RowWidth` - table carries extra columns
    pub fn push_event(&mut self, record: &EventRecord) -> Result<(), TableError> {
        self.push_row(record.to_row())
    }
}
