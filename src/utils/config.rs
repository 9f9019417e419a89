//! Configuration and constants shared across the crate.

/// Auxiliary tables stored next to `events`, in the order they are written and loaded
pub const TOP_LEVEL_NAMES: [&str; 7] = [
    "event_types",
    "event_names",
    "event_attributes",
    "nodes",
    "threads",
    "information",
    "errors",
];

/// Name of the event log table
pub const EVENTS_TABLE: &str = "events";

/// Name of the metadata dictionary table
pub const INFORMATION_TABLE: &str = "information";

/// Columns every event row carries
pub const BASIC_EVENT_COLUMNS: [&str; 9] = [
    "node_id",
    "thread_id",
    "handle_id",
    "type",
    "begin",
    "end",
    "duration",
    "flags",
    "id",
];

/// Metadata keys used when naming a trace
pub const DEFAULT_DESCRIPTORS: [&str; 7] =
    ["hostname", "exe", "ncores", "N", "NB", "sched", "gflops"];

/// Metadata key holding the run's start time; also the merge tag column
pub const START_TIME_KEY: &str = "start_time";

/// Default grouping key for trace sets
pub const DEFAULT_GROUP_KEY: &str = "cmdline";

// Producers historically wrote benchmark parameters as PARAM_<NAME>
pub const PARAM_KEY_PREFIX: &str = "PARAM_";

// Filename markers written by the raw trace converter
pub const PBT_CORE: &str = ".prof-";
pub const OLD_PTT_CORE: &str = ".h5-";
pub const PTT_EXT: &str = ".h5";

/// Suffix of the scratch file a save writes before renaming
pub const TMP_SUFFIX: &str = ".tmp";

/// Container file magic bytes
pub const CONTAINER_MAGIC: &[u8; 4] = b"PTTC";

/// Current container format version
pub const CONTAINER_VERSION: u16 = 1;

/// Rows per frame when a table is written in grouped layout
pub const GROUPED_CHUNK_ROWS: usize = 65_536;

/// Highest zstd level accepted for frame compression
pub const MAX_COMPRESSION_LEVEL: i32 = 22;
