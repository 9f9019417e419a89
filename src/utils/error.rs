//! Error types for the entire library.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading trace metadata
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetadataError {
    #[error("Metadata key not found: {0}")]
    NotFound(String),

    #[error("Executable name does not contain a benchmark name: {0}")]
    MalformedExecutable(String),
}

/// Errors that can occur while building or reshaping tables
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("Column '{column}' has {found} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Row has {found} values, table has {expected} columns")]
    RowWidth { expected: usize, found: usize },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),
}

/// Errors that can occur while parsing or applying event filters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Malformed filter '{0}': expected key==value or key!=value")]
    Malformed(String),

    #[error("Filter reference '{0}' does not name a scalar value")]
    NotScalar(String),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Errors that can occur while reading or writing container files
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize table payload: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid container file: {0}")]
    InvalidFormat(String),

    #[error("Unsupported container version: {0}")]
    UnsupportedVersion(u16),

    #[error("Table not found in container: {0}")]
    MissingTable(String),

    #[error("Invalid compression settings: {0}")]
    InvalidCompression(String),

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Errors that can occur while grouping or merging traces
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MergeError {
    #[error("Cannot merge an empty trace set")]
    EmptySet,

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    Table(#[from] TableError),
}
