use crate::storage::SaveOptions;
use crate::utils::config::DEFAULT_GROUP_KEY;
use std::path::PathBuf;

/// Arguments for the info command
#[derive(Debug, Clone, Default)]
pub struct InfoArgs {
    /// Container file to inspect
    pub file: PathBuf,

    /// Load the event log too (default: skeleton only)
    pub full: bool,
}

/// Arguments for the filter command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct FilterArgs {
    /// Container file to filter
    pub file: PathBuf,

    /// `key==value` / `key!=value` expressions, all of which must hold
    pub filters: Vec<String>,

    /// Where to save a trace holding only the matching events
    pub output: Option<PathBuf>,

    /// How to write `output`
    pub save: SaveOptions,
}

/// Arguments for the merge command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct MergeArgs {
    /// Container files to group and merge
    pub files: Vec<PathBuf>,

    /// Metadata keys forming the grouping key
    pub on: Vec<String>,

    /// Directory receiving one file per merged set
    pub output_dir: PathBuf,

    /// How to write merged traces
    pub save: SaveOptions,
}

impl Default for MergeArgs {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            on: vec![DEFAULT_GROUP_KEY.to_string()],
            output_dir: PathBuf::from("."),
            save: SaveOptions::default(),
        }
    }
}
