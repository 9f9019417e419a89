//! The trace container: event log, lookup tables and run metadata.

use super::filter::EventFilter;
use crate::metadata::{describe, nice_value, resolve_key, DescribeOptions};
use crate::storage::TableStore;
use crate::table::{Information, Table, Value};
use crate::utils::config::{DEFAULT_DESCRIPTORS, START_TIME_KEY};
use crate::utils::error::{FilterError, MetadataError};
use log::debug;

/// One trace: the event log plus the tables describing it
///
/// Auxiliary tables are always present, possibly empty. A trace loaded with
/// `keep_open` also holds its container file until `close()` or drop.
#[derive(Debug, Default)]
pub struct Trace {
    pub events: Table,
    pub event_types: Table,
    pub event_names: Table,
    pub event_attributes: Table,
    pub nodes: Table,
    pub threads: Table,
    pub information: Information,
    pub errors: Table,
    pub(crate) store: Option<TableStore>,
}

/// Result of a two-tier lookup on a trace
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute<'a> {
    Table(&'a Table),
    Information(&'a Information),
    Value(Value),
}

impl<'a> Attribute<'a> {
    /// The scalar behind this attribute, if it is one
    pub fn into_value(self) -> Option<Value> {
        match self {
            Attribute::Value(v) => Some(v),
            _ => None,
        }
    }
}

/// Copies the tables; the copy never holds an open container file.
impl Clone for Trace {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
            event_types: self.event_types.clone(),
            event_names: self.event_names.clone(),
            event_attributes: self.event_attributes.clone(),
            nodes: self.nodes.clone(),
            threads: self.threads.clone(),
            information: self.information.clone(),
            errors: self.errors.clone(),
            store: None,
        }
    }
}

impl Trace {
    /// Create a trace from its event log and metadata; other tables start empty
    pub fn new(events: Table, information: Information) -> Self {
        Self {
            events,
            event_types: Table::new(),
            event_names: Table::new(),
            event_attributes: Table::new(),
            nodes: Table::new(),
            threads: Table::new(),
            information,
            errors: Table::new(),
            store: None,
        }
    }

    /// Auxiliary table by canonical name (`information` excluded)
    pub fn table(&self, name: &str) -> Option<&Table> {
        match name {
            "events" => Some(&self.events),
            "event_types" => Some(&self.event_types),
            "event_names" => Some(&self.event_names),
            "event_attributes" => Some(&self.event_attributes),
            "nodes" => Some(&self.nodes),
            "threads" => Some(&self.threads),
            "errors" => Some(&self.errors),
            _ => None,
        }
    }

    pub(crate) fn table_mut(&mut self, name: &str) -> Option<&mut Table> {
        match name {
            "events" => Some(&mut self.events),
            "event_types" => Some(&mut self.event_types),
            "event_names" => Some(&mut self.event_names),
            "event_attributes" => Some(&mut self.event_attributes),
            "nodes" => Some(&mut self.nodes),
            "threads" => Some(&mut self.threads),
            "errors" => Some(&mut self.errors),
            _ => None,
        }
    }

    /// Own fields and computed values, without touching metadata
    ///
    /// **Public** - first tier of the lookup
    pub fn field(&self, name: &str) -> Option<Attribute<'_>> {
        if name == "information" {
            return Some(Attribute::Information(&self.information));
        }
        if let Some(table) = self.table(name) {
            return Some(Attribute::Table(table));
        }

        let count = match name {
            "event_count" => self.events.len(),
            "node_count" => self.nodes.len(),
            "thread_count" => self.threads.len(),
            "error_count" => self.errors.len(),
            _ => return None,
        };
        Some(Attribute::Value(Value::Int(count as i64)))
    }

    /// Two-tier lookup: own fields first, then formatted metadata
    ///
    /// **Public** - non-strict variant, `Ok(None)` when nothing matches
    ///
    /// # Errors
    /// * `MetadataError::MalformedExecutable` - metadata exists but cannot be formatted
    pub fn get(&self, name: &str) -> Result<Option<Attribute<'_>>, MetadataError> {
        if let Some(field) = self.field(name) {
            return Ok(Some(field));
        }
        match self.metadata(name) {
            Ok(value) => Ok(Some(Attribute::Value(value))),
            Err(MetadataError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Two-tier lookup that fails when nothing matches
    ///
    /// **Public** - strict variant of `get`
    pub fn attr(&self, name: &str) -> Result<Attribute<'_>, MetadataError> {
        self.get(name)?
            .ok_or_else(|| MetadataError::NotFound(name.to_string()))
    }

    /// Formatted metadata value for `key`, using key resolution
    ///
    /// **Public** - strict metadata lookup
    ///
    /// # Errors
    /// * `MetadataError::NotFound` - no spelling of the key exists
    /// * `MetadataError::MalformedExecutable` - `exe` without a benchmark name
    pub fn metadata(&self, key: &str) -> Result<Value, MetadataError> {
        let real_key = resolve_key(&self.information, key);
        nice_value(&self.information, &real_key)
    }

    /// Raw metadata value for `key`, using key resolution
    pub fn raw_metadata(&self, key: &str) -> Option<&Value> {
        self.information.get(&resolve_key(&self.information, key))
    }

    /// Textual form of the trace: every metadata value, space separated
    pub fn describe(&self) -> Result<String, MetadataError> {
        describe(&self.information, &DescribeOptions::all_keys())
    }

    /// Short name from the default descriptors, dash separated
    pub fn name(&self) -> Result<String, MetadataError> {
        self.name_with(&DEFAULT_DESCRIPTORS, &[])
    }

    /// Name from `infos` followed by `add_infos`, dash separated
    pub fn name_with(&self, infos: &[&str], add_infos: &[&str]) -> Result<String, MetadataError> {
        let keys = infos.iter().chain(add_infos).copied();
        let options = DescribeOptions::default().with_keys(keys).with_sep("-");
        describe(&self.information, &options)
    }

    /// Name that distinguishes runs of the same configuration
    pub fn unique_name(&self) -> Result<String, MetadataError> {
        let mut infos = vec![START_TIME_KEY];
        infos.extend(DEFAULT_DESCRIPTORS);
        self.name_with(&infos, &[])
    }

    /// Events matching every filter expression
    ///
    /// **Public** - expressions are `key==value` or `key!=value`; a value
    /// written `.name` refers to a field or metadata value of this trace.
    /// The event log itself is left untouched.
    ///
    /// # Errors
    /// * `FilterError::Malformed` - expression without exactly one comparator
    /// * `FilterError::Table` - unknown event column
    /// * `FilterError::Metadata` / `FilterError::NotScalar` - bad reference
    pub fn filter_events<S: AsRef<str>>(&self, filters: &[S]) -> Result<Table, FilterError> {
        let mut current: Option<Table> = None;

        for text in filters {
            let filter: EventFilter = text.as_ref().parse()?;
            let source = current.as_ref().unwrap_or(&self.events);
            let filtered = filter.apply(source, self)?;
            debug!(
                "Filter '{}' kept {} of {} events",
                text.as_ref(),
                filtered.len(),
                source.len()
            );
            current = Some(filtered);
        }

        Ok(current.unwrap_or_else(|| self.events.clone()))
    }

    /// Whether a container file is still held open
    pub fn is_open(&self) -> bool {
        self.store.is_some()
    }

    /// Release the backing container file, if any
    ///
    /// Safe to call repeatedly; never fails.
    pub fn close(&mut self) {
        if let Some(store) = self.store.take() {
            store.close();
        }
    }
}

impl Drop for Trace {
    fn drop(&mut self) {
        self.close();
    }
}
