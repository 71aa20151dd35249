//! Entry - metadata of one archive member.

use crate::formats::{CompressionMethod, HostOs};
use chrono::NaiveDateTime;

/// One member of a RAR archive, as described by its file header block.
///
/// Entries are produced by [`FileHeaderParser`](crate::parsing::FileHeaderParser)
/// and never modified afterwards. They carry no payload; use
/// [`RarArchive::extract`](crate::RarArchive::extract) to fetch the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Last path component of `path`.
    pub name: String,
    /// Full stored path, separators left as stored.
    pub path: String,
    /// Unpacked size.
    pub size: u64,
    /// Packed size (bytes of payload following the header).
    pub size_packed: u64,
    /// Stored CRC32 of the unpacked data. Not verified.
    pub crc: u32,
    /// Absolute offset of the file header block.
    pub offset: u64,
    /// Length of the file header block.
    pub header_size: u64,
    /// `header_size + size_packed`.
    pub block_size: u64,
    pub encrypted: bool,
    /// Set when either continuation flag is set.
    pub partial: bool,
    /// Entry continues from the previous volume.
    pub continues_from: bool,
    /// Entry continues in the next volume.
    pub continues: bool,
    /// Minimum version needed to extract.
    pub version: u8,
    /// Raw compression method byte (`0x30` = store .. `0x35` = best).
    pub method: u8,
    pub os: HostOs,
    pub time: NaiveDateTime,
}

impl Entry {
    pub fn compression_method(&self) -> Option<CompressionMethod> {
        CompressionMethod::from_u8(self.method)
    }

    pub fn is_stored(&self) -> bool {
        self.method == CompressionMethod::Store as u8
    }

    /// Absolute offset of the first payload byte.
    pub fn data_offset(&self) -> u64 {
        self.offset + self.header_size
    }
}
