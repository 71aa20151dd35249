//! Marker header parser - RAR signature.
//!
//! The marker header is the first 7 bytes of a RAR file:
//! `0x52 0x61 0x72 0x21 0x1A 0x07 0x00`. It is itself a block
//! (type `0x72`, size 7), so the main archive header starts right after it.

use crate::error::{RarError, Result};
use crate::formats::Signature;

#[derive(Debug, Clone)]
pub struct MarkerHeader {
    pub crc: u16,
    pub header_type: u8,
    pub flags: u16,
    pub size: u16,
}

pub struct MarkerHeaderParser;

impl MarkerHeaderParser {
    pub const HEADER_SIZE: usize = 7;

    /// Verify the signature and parse it as a generic block prefix.
    pub fn parse(buffer: &[u8]) -> Result<MarkerHeader> {
        if buffer.len() < Self::HEADER_SIZE {
            return Err(RarError::BufferTooSmall {
                needed: Self::HEADER_SIZE,
                have: buffer.len(),
            });
        }

        if !Signature::matches(buffer) {
            if Signature::is_rar5(buffer) {
                tracing::debug!("RAR5 signature found, only RAR4 archives are supported");
            }
            return Err(RarError::InvalidArchive);
        }

        Ok(MarkerHeader {
            crc: u16::from_le_bytes([buffer[0], buffer[1]]),
            header_type: buffer[2],
            flags: u16::from_le_bytes([buffer[3], buffer[4]]),
            size: u16::from_le_bytes([buffer[5], buffer[6]]),
        })
    }
}
