//! Merge command implementation.
//!
//! The merge command:
//! 1. Loads every input trace
//! 2. Groups them by composite key
//! 3. Merges each group
//! 4. Writes one container file per group

use super::models::MergeArgs;
use crate::merge::{automerge_trace_sets, find_trace_sets, MatchingValues};
use crate::storage::LoadOptions;
use crate::trace::Trace;
use crate::utils::config::PTT_EXT;
use anyhow::{Context, Result};
use log::{debug, info};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;

/// Execute the merge command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// Paths of the files written
pub fn execute_merge(args: &MergeArgs) -> Result<Vec<PathBuf>> {
    let start_time = Instant::now();

    info!("Step 1/3: Loading {} traces...", args.files.len());
    let traces = args
        .files
        .iter()
        .map(|file| {
            Trace::load(file, &LoadOptions::default())
                .with_context(|| format!("Failed to load {}", file.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    info!("Step 2/3: Grouping on {:?}...", args.on);
    let on: Vec<&str> = args.on.iter().map(String::as_str).collect();
    let sets = find_trace_sets(&traces, &on).context("Failed to group traces")?;
    for (key, set) in &sets {
        debug!("  {} trace(s): {}", set.len(), key);
    }

    info!("Step 3/3: Merging {} sets...", sets.len());
    let merged = automerge_trace_sets(sets.values(), &MatchingValues)
        .context("Failed to merge traces")?;

    let mut written = Vec::with_capacity(merged.len());
    let mut used_names = HashSet::new();
    for (index, trace) in merged.iter().enumerate() {
        let name = output_name(trace, index, &mut used_names)?;
        let path = args.output_dir.join(format!("{}{}", name, PTT_EXT));

        if trace.save(&path, &args.save)? {
            info!("✓ Merged trace written to: {}", path.display());
            written.push(path);
        } else {
            println!("{} exists, not overwritten", path.display());
        }
    }

    info!("Merge completed in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(written)
}

/// File stem for the merged trace at `index`, distinct within one run
///
/// Reconciliation usually drops `start_time`, so sets that differ only in
/// keys outside the default descriptors share a unique name. Later sets get
/// the set index appended.
fn output_name(trace: &Trace, index: usize, used: &mut HashSet<String>) -> Result<String> {
    let base = match trace.unique_name()?.replace('/', "") {
        name if name.is_empty() => format!("merged-{}", index),
        name => name,
    };

    let mut name = base.clone();
    let mut suffix = index;
    while used.contains(&name) {
        name = format!("{}-{}", base, suffix);
        suffix += 1;
    }
    if name != base {
        debug!("Output name '{}' already used, writing '{}'", base, name);
    }
    used.insert(name.clone());
    Ok(name)
}

/// Validate merge arguments
///
/// **Public** - can be called before execute_merge for early validation
pub fn validate_args(args: &MergeArgs) -> Result<()> {
    if args.files.is_empty() {
        anyhow::bail!("At least one trace file is required");
    }

    if args.on.is_empty() {
        anyhow::bail!("At least one grouping key is required");
    }

    args.save.compression.validate()?;

    Ok(())
}
