//! Grouping and merging of related traces.
//!
//! Traces of the same experiment (by default: the same command line) are
//! grouped with `find_trace_sets` and combined with `automerge_trace_sets`.
//!
//! # Example
//! ```ignore
//! use trace_tables::merge::{automerge_trace_sets, find_trace_sets, MatchingValues};
//!
//! let sets = find_trace_sets(&traces, &["cmdline"])?;
//! let merged = automerge_trace_sets(sets.values(), &MatchingValues)?;
//! ```

pub mod automerge;
pub mod grouping;
pub mod reconcile;

// Re-export main functions
pub use automerge::{automerge_trace_sets, merge_trace_set};
pub use grouping::{find_trace_sets, set_key, TraceSets};
pub use reconcile::{MatchingValues, ReconcilePolicy};
