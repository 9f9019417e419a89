//! On-disk layout of container files.
//!
//! ```text
//! file   := magic "PTTC" | version u16 | frame*
//! frame  := name_len u16 | name utf8 | layout u8 | codec u8 | len u64 | payload
//! ```
//!
//! Integers are little-endian. Payloads are JSON, optionally zstd
//! compressed. A table written in grouped layout spans several frames with
//! the same name, read back in file order.

use crate::utils::config::MAX_COMPRESSION_LEVEL;
use crate::utils::error::StoreError;
use std::fmt;
use std::io::Read;
use std::str::FromStr;

/// How a table is split into frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One frame holding the whole table
    Fixed,
    /// Row chunks, one frame each
    Grouped,
}

impl Layout {
    pub(crate) fn to_byte(self) -> u8 {
        match self {
            Layout::Fixed => 0,
            Layout::Grouped => 1,
        }
    }

    pub(crate) fn from_byte(byte: u8) -> Result<Self, StoreError> {
        match byte {
            0 => Ok(Layout::Fixed),
            1 => Ok(Layout::Grouped),
            other => Err(StoreError::InvalidFormat(format!(
                "unknown frame layout {}",
                other
            ))),
        }
    }
}

/// Payload compression algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    None,
    Zstd,
}

impl Codec {
    pub(crate) fn to_byte(self) -> u8 {
        match self {
            Codec::None => 0,
            Codec::Zstd => 1,
        }
    }

    pub(crate) fn from_byte(byte: u8) -> Result<Self, StoreError> {
        match byte {
            0 => Ok(Codec::None),
            1 => Ok(Codec::Zstd),
            other => Err(StoreError::InvalidFormat(format!(
                "unknown frame codec {}",
                other
            ))),
        }
    }
}

impl FromStr for Codec {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Codec::None),
            "zstd" => Ok(Codec::Zstd),
            other => Err(StoreError::InvalidCompression(format!(
                "unknown codec '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Codec::None => write!(f, "none"),
            Codec::Zstd => write!(f, "zstd"),
        }
    }
}

/// Compression applied to every frame written
///
/// Level 0 disables compression whatever the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compression {
    pub level: i32,
    pub codec: Codec,
}

impl Default for Compression {
    fn default() -> Self {
        Self {
            level: 0,
            codec: Codec::Zstd,
        }
    }
}

impl Compression {
    pub fn new(level: i32, codec: Codec) -> Self {
        Self { level, codec }
    }

    /// Check the level is usable
    ///
    /// # Errors
    /// * `StoreError::InvalidCompression` - level outside `0..=22`
    pub fn validate(&self) -> Result<(), StoreError> {
        if !(0..=MAX_COMPRESSION_LEVEL).contains(&self.level) {
            return Err(StoreError::InvalidCompression(format!(
                "level {} outside 0..={}",
                self.level, MAX_COMPRESSION_LEVEL
            )));
        }
        Ok(())
    }

    /// Codec actually written to frames
    pub fn effective_codec(&self) -> Codec {
        if self.level == 0 {
            Codec::None
        } else {
            self.codec
        }
    }

    pub(crate) fn encode(&self, payload: Vec<u8>) -> Result<Vec<u8>, StoreError> {
        match self.effective_codec() {
            Codec::None => Ok(payload),
            Codec::Zstd => Ok(zstd::encode_all(payload.as_slice(), self.level)?),
        }
    }
}

pub(crate) fn decode(codec: Codec, payload: Vec<u8>) -> Result<Vec<u8>, StoreError> {
    match codec {
        Codec::None => Ok(payload),
        Codec::Zstd => Ok(zstd::decode_all(payload.as_slice())?),
    }
}

pub(crate) fn read_u8(reader: &mut impl Read) -> Result<u8, StoreError> {
    let mut buf = [0u8; 1];
    reader.read_exact(&mut buf)?;
    Ok(buf[0])
}

pub(crate) fn read_u16(reader: &mut impl Read) -> Result<u16, StoreError> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

pub(crate) fn read_u64(reader: &mut impl Read) -> Result<u64, StoreError> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}
