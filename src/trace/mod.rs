//! Trace container and event filtering.
//!
//! A `Trace` bundles the event log with its lookup tables and run metadata.
//! Lookups check the trace's own fields first and fall back to metadata;
//! filters select events by column value.

pub mod container;
pub mod filter;

// Re-export main types
pub use container::{Attribute, Trace};
pub use filter::{Comparator, EventFilter, Operand};
