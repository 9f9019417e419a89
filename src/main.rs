//! Trace Tables CLI
//!
//! Inspect, filter and merge trace container files, and check raw trace
//! filenames before conversion.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use trace_tables::commands::{
    check_conflicts, display_converted_names, execute_filter, execute_info, execute_merge,
    validate_args, FilterArgs, InfoArgs, MergeArgs,
};
use trace_tables::storage::{Codec, Compression, SaveOptions};
use trace_tables::utils::config::DEFAULT_GROUP_KEY;

/// Trace Tables - columnar trace files for parallel runtime profiles
#[derive(Parser, Debug)]
#[command(name = "ptt")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Write settings shared by commands that save traces
#[derive(Args, Debug)]
struct WriteFlags {
    /// Store events as row chunks
    #[arg(long)]
    grouped: bool,

    /// Mark events as appendable (implies --grouped)
    #[arg(long)]
    append: bool,

    /// Keep existing output files instead of replacing them
    #[arg(long)]
    no_overwrite: bool,

    /// Compression level (0 disables compression)
    #[arg(long, default_value = "0")]
    complevel: i32,

    /// Compression codec (zstd or none)
    #[arg(long, default_value = "zstd")]
    complib: String,
}

impl WriteFlags {
    fn to_options(&self) -> Result<SaveOptions> {
        let codec: Codec = self.complib.parse()?;
        Ok(SaveOptions {
            grouped: self.grouped,
            append: self.append,
            overwrite: !self.no_overwrite,
            compression: Compression::new(self.complevel, codec),
        })
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize a trace container file
    Info {
        /// Container file
        file: PathBuf,

        /// Also load the event log
        #[arg(long)]
        full: bool,
    },

    /// Select events by column value
    Filter {
        /// Container file
        file: PathBuf,

        /// Filter expression (key==value or key!=value); repeatable
        #[arg(short = 'w', long = "where", required = true)]
        filters: Vec<String>,

        /// Save a trace holding only the matching events
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        write: WriteFlags,
    },

    /// Group traces of the same experiment and merge each group
    Merge {
        /// Container files
        files: Vec<PathBuf>,

        /// Metadata key to group on; repeatable
        #[arg(long, default_value = DEFAULT_GROUP_KEY)]
        on: Vec<String>,

        /// Directory for merged traces
        #[arg(short = 'd', long, default_value = ".")]
        output_dir: PathBuf,

        #[command(flatten)]
        write: WriteFlags,
    },

    /// List converted files that converting these raw traces would collide with
    Conflicts {
        /// Raw trace filenames
        #[arg(required = true)]
        files: Vec<String>,
    },

    /// Print the converted filename for raw trace filenames
    ConvertName {
        /// Raw trace filenames
        #[arg(required = true)]
        files: Vec<String>,
    },
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Info { file, full } => {
            execute_info(&InfoArgs { file, full })?;
        }

        Commands::Filter {
            file,
            filters,
            output,
            write,
        } => {
            let args = FilterArgs {
                file,
                filters,
                output,
                save: write.to_options()?,
            };
            execute_filter(&args)?;
        }

        Commands::Merge {
            files,
            on,
            output_dir,
            write,
        } => {
            let args = MergeArgs {
                files,
                on,
                output_dir,
                save: write.to_options()?,
            };

            // Validate args first
            validate_args(&args)?;

            execute_merge(&args)?;
        }

        Commands::Conflicts { files } => {
            if check_conflicts(&files)? {
                std::process::exit(1);
            }
        }

        Commands::ConvertName { files } => {
            display_converted_names(&files);
        }
    }

    Ok(())
}
