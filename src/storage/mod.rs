//! Container file persistence.
//!
//! A container file holds the eight tables of a trace as named frames.
//! This module handles:
//! - The frame format and its compression
//! - Reading tables on demand from an open file
//! - Atomic saves and (skeleton) loads of whole traces

pub mod format;
pub mod persist;
pub mod reader;
pub mod writer;

// Re-export main types
pub use format::{Codec, Compression, Layout};
pub use persist::{tmp_path_for, LoadOptions, SaveOptions};
pub use reader::TableStore;
pub use writer::TableStoreWriter;
