//! Detect converted files that a new conversion would collide with.
//!
//! Distributed runs write one raw file per rank, each ending in a six
//! character id chosen by the MPI launcher. A full conversion produces a
//! single converted file named after one of those ids, so an existing
//! `*<id>.h5` means the run was already converted.

use crate::utils::config::PTT_EXT;
use log::debug;
use regex::Regex;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

/// `<name>...<.prof><middle>-<rank id>`
static DOT_PROF_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+).*(\.prof)(.*)-([a-zA-Z0-9]{6})").expect("raw trace pattern is valid")
});

/// Six character rank id of a raw trace filename
pub fn rank_id(filename: &str) -> Option<&str> {
    DOT_PROF_REGEX
        .captures(filename)
        .and_then(|caps| caps.get(4))
        .map(|m| m.as_str())
}

/// Converted files in the working directory that collide with `filenames`
///
/// **Public** - see `find_h5_conflicts_in`
pub fn find_h5_conflicts<S: AsRef<str>>(filenames: &[S]) -> io::Result<Option<Vec<String>>> {
    find_h5_conflicts_in(Path::new("."), filenames)
}

/// Converted files in `dir` that collide with `filenames`
///
/// **Public** - main entry point for conflict checks
///
/// # Arguments
/// * `dir` - Directory to scan
/// * `filenames` - Raw trace filenames about to be converted
///
/// # Returns
/// The rank id of the first filename that looks like a raw trace selects
/// every visible entry of `dir` ending in `<id>.h5`. `None` means no conflict: no
/// filename had a rank id, or nothing in `dir` matched.
pub fn find_h5_conflicts_in<S: AsRef<str>>(
    dir: &Path,
    filenames: &[S],
) -> io::Result<Option<Vec<String>>> {
    let Some(id) = filenames.iter().find_map(|f| rank_id(f.as_ref())) else {
        debug!("No raw trace rank id found in {} filenames", filenames.len());
        return Ok(None);
    };

    let suffix = format!("{}{}", id, PTT_EXT);
    let mut conflicts = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let name = entry?.file_name().to_string_lossy().into_owned();
        // hidden files are never conversion outputs
        if !name.starts_with('.') && name.ends_with(&suffix) {
            conflicts.push(name);
        }
    }
    conflicts.sort();

    debug!(
        "Rank id '{}': {} conflicting files in {}",
        id,
        conflicts.len(),
        dir.display()
    );
    Ok(if conflicts.is_empty() {
        None
    } else {
        Some(conflicts)
    })
}
