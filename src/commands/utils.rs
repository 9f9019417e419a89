use crate::naming::{find_h5_conflicts, get_basic_ptt_name, is_pbt, is_ptt};
use anyhow::Result;
use log::warn;

/// Report converted files that converting `files` would collide with
///
/// # Returns
/// Whether any conflict was found
pub fn check_conflicts(files: &[String]) -> Result<bool> {
    match find_h5_conflicts(files)? {
        Some(conflicts) => {
            println!("Found {} conflicting file(s):", conflicts.len());
            for name in &conflicts {
                println!("  {}", name);
            }
            Ok(true)
        }
        None => {
            println!("No conflicts");
            Ok(false)
        }
    }
}

/// Print the converted name of each file
pub fn display_converted_names(files: &[String]) {
    for file in files {
        if !is_pbt(file) && !is_ptt(file) {
            warn!("{} does not look like a trace file", file);
        }
        println!("{} -> {}", file, get_basic_ptt_name(file));
    }
}
