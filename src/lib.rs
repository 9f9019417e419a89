//! Trace Tables
//!
//! In-memory representation and container file format for performance
//! traces of parallel runtimes: an event log, the lookup tables describing
//! it and a dictionary of run metadata.
//!
//! This crate provides the core implementation for the `ptt` CLI tool.
//!
//! ## Getting Started
//!
//! ```ignore
//! use trace_tables::storage::LoadOptions;
//! use trace_tables::trace::Trace;
//!
//! let trace = Trace::load("dpotrf-abc123.h5", &LoadOptions::default())?;
//! println!("{}", trace.name()?);
//! let tasks = trace.filter_events(&["type==3", "node_id==0"])?;
//! ```

pub mod commands;
pub mod merge;
pub mod metadata;
pub mod naming;
pub mod storage;
pub mod table;
pub mod trace;
pub mod utils;

// Re-export the types most callers need
pub use table::{EventRecord, Information, Table, Value};
pub use trace::Trace;
