//! Trace metadata helpers.
//!
//! This module handles:
//! - Resolving key spellings (`nb`, `NB`, `PARAM_NB`)
//! - Formatting well-known values for display
//! - Building descriptions and names from metadata

pub mod describe;
pub mod keys;

// Re-export main functions
pub use describe::{describe, DescribeOptions};
pub use keys::{format_value, nice_value, resolve_key};
