//! Columnar tables and the scalar values they hold.
//!
//! Every table of a trace (event log, lookup tables, errors) uses the same
//! `Table` type; `Information` is the metadata dictionary.

pub mod columns;
pub mod events;
pub mod value;

// Re-export main types
pub use columns::Table;
pub use events::EventRecord;
pub use value::Value;

/// Run metadata: free-form keys to scalar values, in producer order
pub type Information = indexmap::IndexMap<String, Value>;
