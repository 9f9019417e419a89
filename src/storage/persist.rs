//! Saving and loading traces as container files.
//!
//! Saves go through `<path>.tmp` and a rename, so the final path only ever
//! holds a complete container. An interrupted save leaves at most a stale
//! temporary file behind.

use super::format::{Compression, Layout};
use super::reader::TableStore;
use super::writer::TableStoreWriter;
use crate::table::{Information, Table};
use crate::trace::Trace;
use crate::utils::config::{EVENTS_TABLE, INFORMATION_TABLE, TMP_SUFFIX, TOP_LEVEL_NAMES};
use crate::utils::error::StoreError;
use log::{debug, error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Options for `Trace::save`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    /// Store events as row chunks instead of a single frame
    pub grouped: bool,
    /// Mark events as appendable; implies grouped storage
    pub append: bool,
    /// Replace an existing file at the target path
    pub overwrite: bool,
    pub compression: Compression,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            grouped: false,
            append: false,
            overwrite: true,
            compression: Compression::default(),
        }
    }
}

impl SaveOptions {
    fn events_layout(&self) -> Layout {
        if self.grouped || self.append {
            Layout::Grouped
        } else {
            Layout::Fixed
        }
    }
}

/// Options for `Trace::load`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Skip the event log and load an empty table in its place
    pub skeleton_only: bool,
    /// Keep the container file open on the returned trace
    pub keep_open: bool,
}

impl Trace {
    /// Save this trace to `path`
    ///
    /// **Public** - main entry point for writing container files
    ///
    /// # Returns
    /// `Ok(false)` when `overwrite` is off and `path` exists (nothing is
    /// written), `Ok(true)` once the file is in place.
    ///
    /// # Errors
    /// * `StoreError::Io` - writing or renaming failed; `path` is untouched
    /// * `StoreError::InvalidCompression` - bad compression level
    pub fn save(&self, path: impl AsRef<Path>, options: &SaveOptions) -> Result<bool, StoreError> {
        let path = path.as_ref();

        if !options.overwrite && path.exists() {
            info!("Not overwriting existing file: {}", path.display());
            return Ok(false);
        }
        options.compression.validate()?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("Creating parent directories: {}", parent.display());
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = tmp_path_for(path);
        if tmp_path.exists() {
            warn!("Replacing stale temporary file: {}", tmp_path.display());
        }

        info!("Writing trace to: {}", path.display());
        if let Err(e) = self
            .write_container(&tmp_path, options)
            .and_then(|()| fs::rename(&tmp_path, path).map_err(StoreError::from))
        {
            // best effort; the final path was never touched
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        // the rename is durable only once its directory is synced
        if let Err(e) = sync_parent_dir(path) {
            warn!("Could not sync directory of {}: {}", path.display(), e);
        }

        info!(
            "Trace written successfully ({} events, {} bytes)",
            self.events.len(),
            fs::metadata(path).map(|m| m.len()).unwrap_or(0)
        );
        Ok(true)
    }

    fn write_container(&self, tmp_path: &Path, options: &SaveOptions) -> Result<(), StoreError> {
        let mut writer = TableStoreWriter::create(tmp_path, options.compression)?;

        for name in TOP_LEVEL_NAMES {
            if name == INFORMATION_TABLE {
                writer.put_information(name, &self.information)?;
            } else {
                let table = self
                    .table(name)
                    .ok_or_else(|| StoreError::MissingTable(name.to_string()))?;
                writer.put_table(name, table, Layout::Fixed)?;
            }
        }

        if options.append && !options.grouped {
            debug!("Append requested; storing events in grouped layout");
        }
        writer.put_table(EVENTS_TABLE, &self.events, options.events_layout())?;

        writer.finish()
    }

    /// Load a trace from the container file at `path`
    ///
    /// **Public** - main entry point for reading container files
    ///
    /// Auxiliary tables are read in canonical order, then the event log
    /// unless `skeleton_only` is set.
    ///
    /// # Errors
    /// * `StoreError::MissingTable` - an expected table is absent; the name
    ///   and the raw information table are logged first
    /// * `StoreError::InvalidFormat` / `StoreError::UnsupportedVersion` - not a
    ///   readable container
    pub fn load(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Trace, StoreError> {
        let path = path.as_ref();
        debug!("Reading trace from: {}", path.display());

        let mut store = TableStore::open(path)?;
        let mut trace = Trace::new(Table::new(), Information::new());

        for name in TOP_LEVEL_NAMES {
            ensure_present(&mut store, name)?;
            if name == INFORMATION_TABLE {
                trace.information = store.get_information(name)?;
            } else if let Some(slot) = trace.table_mut(name) {
                *slot = store.get_table(name)?;
            }
        }

        if !options.skeleton_only {
            ensure_present(&mut store, EVENTS_TABLE)?;
            trace.events = store.get_table(EVENTS_TABLE)?;
        }

        debug!(
            "Loaded trace: {} events, {} nodes, {} threads{}",
            trace.events.len(),
            trace.nodes.len(),
            trace.threads.len(),
            if options.skeleton_only { " (skeleton)" } else { "" }
        );

        if options.keep_open {
            trace.store = Some(store);
        } else {
            store.close();
        }
        Ok(trace)
    }
}

/// Fail with `MissingTable` after logging what the file does contain
fn ensure_present(store: &mut TableStore, name: &str) -> Result<(), StoreError> {
    if store.contains(name) {
        return Ok(());
    }

    error!(
        "Table '{}' missing from {} (found: {:?})",
        name,
        store.path().display(),
        store.keys()
    );
    match store.raw(INFORMATION_TABLE) {
        Ok(text) => error!("information: {}", text),
        Err(e) => error!("information unavailable: {}", e),
    }
    Err(StoreError::MissingTable(name.to_string()))
}

/// Flush the directory entry of `path` to disk
#[cfg(unix)]
fn sync_parent_dir(path: &Path) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::File::open(parent)?.sync_all()
}

/// Directories cannot be opened for syncing here
#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// `<path>.tmp`, keeping the full file name
pub fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(TMP_SUFFIX);
    PathBuf::from(name)
}
