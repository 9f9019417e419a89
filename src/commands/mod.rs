//! CLI command implementations.
//!
//! Commands orchestrate the library components to perform user tasks.

pub mod inspect;
pub mod merge;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use inspect::{execute_filter, execute_info};
pub use merge::{execute_merge, validate_args};
pub use models::{FilterArgs, InfoArgs, MergeArgs};
pub use utils::{check_conflicts, display_converted_names};
