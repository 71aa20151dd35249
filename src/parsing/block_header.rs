//! Generic block header parser.
//!
//! Every block after the marker starts with CRC16, type, flags and a 16-bit
//! size. When flag `0x8000` (LONG_BLOCK) is set, a 32-bit ADD_SIZE follows
//! and the block extends that many bytes past its header.

use crate::codec::{read_u16_le, read_u32_le};
use crate::error::{RarError, Result};

/// Flag marking a 32-bit ADD_SIZE field at offset 7.
pub const LONG_BLOCK: u16 = 0x8000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub crc: u16,
    pub header_type: u8,
    pub flags: u16,
    /// HEAD_SIZE: length of the header itself.
    pub head_size: u16,
    /// ADD_SIZE, zero unless LONG_BLOCK is set.
    pub add_size: u32,
}

impl BlockHeader {
    /// Total bytes the block occupies (`head_size + add_size`).
    pub fn size(&self) -> u64 {
        self.head_size as u64 + self.add_size as u64
    }

    pub fn has_add_size(&self) -> bool {
        self.flags & LONG_BLOCK != 0
    }
}

pub struct BlockHeaderParser;

impl BlockHeaderParser {
    /// Bytes read at each block boundary: the 7-byte prefix plus ADD_SIZE.
    pub const HEADER_SIZE: usize = 11;
    const PREFIX_SIZE: usize = 7;

    pub fn parse(buffer: &[u8]) -> Result<BlockHeader> {
        if buffer.len() < Self::PREFIX_SIZE {
            return Err(RarError::BufferTooSmall {
                needed: Self::PREFIX_SIZE,
                have: buffer.len(),
            });
        }

        let flags = read_u16_le(buffer, 3)?;
        let add_size = if flags & LONG_BLOCK != 0 {
            read_u32_le(buffer, 7)?
        } else {
            0
        };

        Ok(BlockHeader {
            crc: read_u16_le(buffer, 0)?,
            header_type: buffer[2],
            flags,
            head_size: read_u16_le(buffer, 5)?,
            add_size,
        })
    }
}
