//! Random-access reader for container files.

use super::format::{decode, read_u16, read_u64, read_u8, Codec, Layout};
use crate::table::{Information, Table};
use crate::utils::config::{CONTAINER_MAGIC, CONTAINER_VERSION};
use crate::utils::error::StoreError;
use log::debug;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// Location of one frame's payload inside the file
#[derive(Debug, Clone)]
struct FrameEntry {
    name: String,
    layout: Layout,
    codec: Codec,
    offset: u64,
    len: u64,
}

/// An open container file
///
/// Opening indexes the frame headers only; payloads are read on demand,
/// so tables that are never requested are never read.
#[derive(Debug)]
pub struct TableStore {
    path: PathBuf,
    reader: BufReader<File>,
    frames: Vec<FrameEntry>,
}

impl TableStore {
    /// Open `path` and index its frames
    ///
    /// # Errors
    /// * `StoreError::Io` - file cannot be read
    /// * `StoreError::InvalidFormat` - bad magic or truncated frame
    /// * `StoreError::UnsupportedVersion` - written by a newer format
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let file_len = file.metadata()?.len();
        let mut reader = BufReader::new(file);

        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic).map_err(|_| {
            StoreError::InvalidFormat(format!("{} is not a trace container", path.display()))
        })?;
        if &magic != CONTAINER_MAGIC {
            return Err(StoreError::InvalidFormat(format!(
                "{} is not a trace container",
                path.display()
            )));
        }

        let version = read_u16(&mut reader)?;
        if version != CONTAINER_VERSION {
            return Err(StoreError::UnsupportedVersion(version));
        }

        let frames = index_frames(&mut reader, file_len)?;
        debug!("Opened {} ({} frames)", path.display(), frames.len());

        Ok(Self {
            path,
            reader,
            frames,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Table names in the order they were first written
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for frame in &self.frames {
            if !keys.contains(&frame.name.as_str()) {
                keys.push(&frame.name);
            }
        }
        keys
    }

    pub fn contains(&self, name: &str) -> bool {
        self.frames.iter().any(|f| f.name == name)
    }

    /// Read the table stored under `name`, joining grouped chunks
    ///
    /// # Errors
    /// * `StoreError::MissingTable` - no frame carries `name`
    pub fn get_table(&mut self, name: &str) -> Result<Table, StoreError> {
        let entries = self.entries(name)?;
        if entries.len() > 1 && entries.iter().any(|e| e.layout == Layout::Fixed) {
            return Err(StoreError::InvalidFormat(format!(
                "fixed table '{}' written more than once",
                name
            )));
        }

        let mut chunks = Vec::with_capacity(entries.len());
        for entry in &entries {
            let payload = self.read_payload(entry)?;
            chunks.push(serde_json::from_slice::<Table>(&payload)?);
        }

        if chunks.len() == 1 {
            return Ok(chunks.remove(0));
        }
        Ok(Table::concat(&chunks))
    }

    /// Read the metadata dictionary stored under `name`
    pub fn get_information(&mut self, name: &str) -> Result<Information, StoreError> {
        let entries = self.entries(name)?;
        let payload = self.read_payload(&entries[0])?;
        Ok(serde_json::from_slice(&payload)?)
    }

    /// Decoded payload text of `name`, for diagnostics
    pub fn raw(&mut self, name: &str) -> Result<String, StoreError> {
        let entries = self.entries(name)?;
        let mut text = String::new();
        for entry in &entries {
            let payload = self.read_payload(entry)?;
            text.push_str(&String::from_utf8_lossy(&payload));
        }
        Ok(text)
    }

    /// Release the file handle
    pub fn close(self) {
        debug!("Closing container file: {}", self.path.display());
    }

    fn entries(&self, name: &str) -> Result<Vec<FrameEntry>, StoreError> {
        let entries: Vec<FrameEntry> = self
            .frames
            .iter()
            .filter(|f| f.name == name)
            .cloned()
            .collect();
        if entries.is_empty() {
            return Err(StoreError::MissingTable(name.to_string()));
        }
        Ok(entries)
    }

    fn read_payload(&mut self, entry: &FrameEntry) -> Result<Vec<u8>, StoreError> {
        self.reader.seek(SeekFrom::Start(entry.offset))?;
        let mut payload = vec![0u8; entry.len as usize];
        self.reader.read_exact(&mut payload)?;
        decode(entry.codec, payload)
    }
}

/// Walk frame headers from the current position to the end of the file
fn index_frames(reader: &mut BufReader<File>, file_len: u64) -> Result<Vec<FrameEntry>, StoreError> {
    let mut frames = Vec::new();
    let truncated = || StoreError::InvalidFormat("truncated frame".to_string());

    let mut position = reader.stream_position()?;
    while position < file_len {
        let name_len = read_u16(reader).map_err(|_| truncated())?;
        let mut name = vec![0u8; name_len as usize];
        reader.read_exact(&mut name).map_err(|_| truncated())?;
        let name = String::from_utf8(name)
            .map_err(|_| StoreError::InvalidFormat("table name is not UTF-8".to_string()))?;

        let layout = Layout::from_byte(read_u8(reader).map_err(|_| truncated())?)?;
        let codec = Codec::from_byte(read_u8(reader).map_err(|_| truncated())?)?;
        let len = read_u64(reader).map_err(|_| truncated())?;

        let offset = reader.stream_position()?;
        if offset.checked_add(len).map_or(true, |end| end > file_len) {
            return Err(truncated());
        }
        reader.seek(SeekFrom::Start(offset + len))?;
        position = offset + len;

        frames.push(FrameEntry {
            name,
            layout,
            codec,
            offset,
            len,
        });
    }

    Ok(frames)
}
