//! Sequential writer for container files.

use super::format::{Compression, Layout};
use crate::table::{Information, Table};
use crate::utils::config::{CONTAINER_MAGIC, CONTAINER_VERSION, GROUPED_CHUNK_ROWS};
use crate::utils::error::StoreError;
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes named tables as frames into a fresh container file
///
/// Nothing is durable until `finish()` flushes and syncs the file.
pub struct TableStoreWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    compression: Compression,
}

impl TableStoreWriter {
    /// Create (or truncate) `path` and write the file header
    pub fn create(path: impl AsRef<Path>, compression: Compression) -> Result<Self, StoreError> {
        compression.validate()?;
        let path = path.as_ref().to_path_buf();

        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(CONTAINER_MAGIC)?;
        writer.write_all(&CONTAINER_VERSION.to_le_bytes())?;

        Ok(Self {
            path,
            writer,
            compression,
        })
    }

    /// Write `table` under `name`
    ///
    /// Grouped layout writes one frame per `GROUPED_CHUNK_ROWS` rows, and at
    /// least one frame so the table's columns survive when it is empty.
    pub fn put_table(&mut self, name: &str, table: &Table, layout: Layout) -> Result<(), StoreError> {
        match layout {
            Layout::Fixed => {
                let payload = serde_json::to_vec(table)?;
                self.write_frame(name, layout, payload)?;
            }
            Layout::Grouped => {
                let chunks = table.chunks(GROUPED_CHUNK_ROWS);
                for chunk in &chunks {
                    let payload = serde_json::to_vec(chunk)?;
                    self.write_frame(name, layout, payload)?;
                }
            }
        }
        debug!(
            "Wrote table '{}' ({} rows, {:?})",
            name,
            table.len(),
            layout
        );
        Ok(())
    }

    /// Write the metadata dictionary under `name`
    pub fn put_information(&mut self, name: &str, info: &Information) -> Result<(), StoreError> {
        let payload = serde_json::to_vec(info)?;
        self.write_frame(name, Layout::Fixed, payload)?;
        debug!("Wrote information '{}' ({} keys)", name, info.len());
        Ok(())
    }

    fn write_frame(&mut self, name: &str, layout: Layout, payload: Vec<u8>) -> Result<(), StoreError> {
        let name_len = u16::try_from(name.len()).map_err(|_| {
            StoreError::InvalidFormat(format!("table name too long: {}", name))
        })?;
        let payload = self.compression.encode(payload)?;

        self.writer.write_all(&name_len.to_le_bytes())?;
        self.writer.write_all(name.as_bytes())?;
        self.writer.write_all(&[layout.to_byte()])?;
        self.writer
            .write_all(&[self.compression.effective_codec().to_byte()])?;
        self.writer.write_all(&(payload.len() as u64).to_le_bytes())?;
        self.writer.write_all(&payload)?;
        Ok(())
    }

    /// Flush buffered frames and sync the file to disk
    pub fn finish(mut self) -> Result<(), StoreError> {
        self.writer.flush()?;
        self.writer.get_ref().sync_all()?;
        debug!("Finished container file: {}", self.path.display());
        Ok(())
    }
}
