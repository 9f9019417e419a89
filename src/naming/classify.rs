//! Filename predicates for raw and converted trace files.
//!
//! The raw trace converter names its inputs `<name>.prof-<id>` and its
//! outputs `<name>-<id>.h5`; older converters wrote `<name>.h5-<id>`.

use crate::utils::config::{OLD_PTT_CORE, PBT_CORE, PTT_EXT};

/// Whether `filename` is a converted trace, current or legacy
pub fn is_ptt(filename: &str) -> bool {
    filename.ends_with(PTT_EXT) || is_old_ptt(filename)
}

/// Whether `filename` uses the legacy converted naming
pub fn is_old_ptt(filename: &str) -> bool {
    filename.contains(OLD_PTT_CORE)
}

/// Whether `filename` is a raw trace file
pub fn is_pbt(filename: &str) -> bool {
    filename.contains(PBT_CORE)
}

/// Converted name for a raw trace file
///
/// Converted names are returned unchanged.
pub fn get_basic_ptt_name(filename: &str) -> String {
    if is_ptt(filename) {
        return filename.to_string();
    }
    format!("{}{}", filename.replace(PBT_CORE, "-"), PTT_EXT)
}
