//! Trace filename conventions.
//!
//! Pure predicates over raw (`.prof-`) and converted (`.h5`) filenames,
//! plus a directory scan for conversions that already exist.

pub mod classify;
pub mod conflicts;

// Re-export main functions
pub use classify::{get_basic_ptt_name, is_old_ptt, is_pbt, is_ptt};
pub use conflicts::{find_h5_conflicts, find_h5_conflicts_in, rank_id};
