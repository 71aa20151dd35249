//! RAR4 header parsing modules.
//!
//! An archive is a marker (the signature), a main archive header, then a
//! sequence of self-delimiting blocks. Every block starts with the same
//! 7-byte prefix: CRC16, type, flags, size.

pub mod archive_header;
pub mod block_header;
pub mod file_header;
pub mod marker_header;

pub use archive_header::{ArchiveHeader, ArchiveHeaderParser};
pub use block_header::{BlockHeader, BlockHeaderParser};
pub use file_header::FileHeaderParser;
pub use marker_header::MarkerHeaderParser;

/// RAR4 block type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum HeaderType {
    Marker = 0x72,
    Archive = 0x73,
    File = 0x74,
    Comment = 0x75,
    AuthInfo = 0x76,
    SubBlock = 0x77,
    Recovery = 0x78,
    NewSub = 0x7A,
    End = 0x7B,
}

impl HeaderType {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0x72 => Some(Self::Marker),
            0x73 => Some(Self::Archive),
            0x74 => Some(Self::File),
            0x75 => Some(Self::Comment),
            0x76 => Some(Self::AuthInfo),
            0x77 => Some(Self::SubBlock),
            0x78 => Some(Self::Recovery),
            0x7A => Some(Self::NewSub),
            0x7B => Some(Self::End),
            _ => None,
        }
    }
}
