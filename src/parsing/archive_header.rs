//! Archive header parser.
//!
//! The archive header (MAIN_HEAD) follows the marker header and contains
//! archive-level flags. Only its 7-byte prefix is needed to walk the
//! archive; the reserved fields are decoded when present.

use super::HeaderType;
use crate::error::{RarError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveHeader {
    pub crc: u16,
    pub header_type: u8,
    pub flags: u16,
    pub size: u16,
    pub reserved1: Option<u16>,
    pub reserved2: Option<u32>,
    // Parsed flags
    pub is_volume: bool,
    pub has_comment: bool,
    pub is_locked: bool,
    pub is_solid: bool,
    pub is_new_name_scheme: bool,
    pub has_auth_info: bool,
    pub has_recovery: bool,
    pub is_block_encoded: bool,
    pub is_first_volume: bool,
}

pub struct ArchiveHeaderParser;

impl ArchiveHeaderParser {
    pub const HEADER_SIZE: usize = 7;
    const FULL_HEADER_SIZE: usize = 13;

    /// Parse the main archive header. Fails with `InvalidArchive` when the
    /// block is not of type `0x73`.
    pub fn parse(buffer: &[u8]) -> Result<ArchiveHeader> {
        if buffer.len() < Self::HEADER_SIZE {
            return Err(RarError::BufferTooSmall {
                needed: Self::HEADER_SIZE,
                have: buffer.len(),
            });
        }

        let crc = u16::from_le_bytes([buffer[0], buffer[1]]);
        let header_type = buffer[2];
        let flags = u16::from_le_bytes([buffer[3], buffer[4]]);
        let size = u16::from_le_bytes([buffer[5], buffer[6]]);

        if header_type != HeaderType::Archive as u8 {
            return Err(RarError::InvalidArchive);
        }

        let (reserved1, reserved2) = if buffer.len() >= Self::FULL_HEADER_SIZE {
            (
                Some(u16::from_le_bytes([buffer[7], buffer[8]])),
                Some(u32::from_le_bytes([
                    buffer[9], buffer[10], buffer[11], buffer[12],
                ])),
            )
        } else {
            (None, None)
        };

        Ok(ArchiveHeader {
            crc,
            header_type,
            flags,
            size,
            reserved1,
            reserved2,
            is_volume: (flags & 0x0001) != 0,
            has_comment: (flags & 0x0002) != 0,
            is_locked: (flags & 0x0004) != 0,
            is_solid: (flags & 0x0008) != 0,
            is_new_name_scheme: (flags & 0x0010) != 0,
            has_auth_info: (flags & 0x0020) != 0,
            has_recovery: (flags & 0x0040) != 0,
            is_block_encoded: (flags & 0x0080) != 0,
            is_first_volume: (flags & 0x0100) != 0,
        })
    }
}
