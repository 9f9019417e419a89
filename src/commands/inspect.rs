//! Info and filter commands.

use super::models::{FilterArgs, InfoArgs};
use crate::storage::LoadOptions;
use crate::trace::Trace;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use log::info;

/// Print a summary of one container file
///
/// **Public** - main entry point called from main.rs
pub fn execute_info(args: &InfoArgs) -> Result<()> {
    let options = LoadOptions {
        skeleton_only: !args.full,
        keep_open: false,
    };
    let trace = Trace::load(&args.file, &options)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let modified: DateTime<Local> = std::fs::metadata(&args.file)?.modified()?.into();

    println!("File:        {}", args.file.display());
    println!("Modified:    {}", modified.format("%Y-%m-%d %H:%M:%S"));
    println!("Name:        {}", trace.name()?);
    println!("Unique name: {}", trace.unique_name()?);
    println!("Description: {}", trace.describe()?);
    println!();
    println!("Tables:");
    if args.full {
        println!("  events:           {} rows", trace.events.len());
    } else {
        println!("  events:           (skipped, use --full)");
    }
    for (name, table) in [
        ("event_types", &trace.event_types),
        ("event_names", &trace.event_names),
        ("event_attributes", &trace.event_attributes),
        ("nodes", &trace.nodes),
        ("threads", &trace.threads),
        ("errors", &trace.errors),
    ] {
        println!("  {:<17} {} rows", format!("{}:", name), table.len());
    }
    println!();
    println!("Information ({} keys):", trace.information.len());
    for (key, value) in &trace.information {
        println!("  {} = {}", key, value);
    }

    Ok(())
}

/// Count (and optionally save) the events matching every filter
///
/// **Public** - main entry point called from main.rs
pub fn execute_filter(args: &FilterArgs) -> Result<()> {
    let trace = Trace::load(&args.file, &LoadOptions::default())
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let filtered = trace
        .filter_events(&args.filters)
        .context("Failed to apply event filters")?;

    println!(
        "{} of {} events match",
        filtered.len(),
        trace.events.len()
    );

    if let Some(output) = &args.output {
        let mut subset = trace.clone();
        subset.events = filtered;
        let written = subset
            .save(output, &args.save)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        if written {
            info!("✓ Filtered trace written to: {}", output.display());
        } else {
            println!("{} exists, not overwritten", output.display());
        }
    }

    Ok(())
}
