//! Synthetic RAR4 archives for unit tests.

use crate::formats::Signature;
use crate::parsing::block_header::LONG_BLOCK;

/// Builder for one file header block plus its payload.
#[derive(Debug, Clone)]
pub struct FileBlock {
    pub flags: u16,
    pub packed_low: u32,
    pub unpacked_low: u32,
    pub high: Option<(u32, u32)>,
    pub os: u8,
    pub crc: u32,
    pub time: u32,
    pub version: u8,
    pub method: u8,
    pub name: Vec<u8>,
    pub data: Vec<u8>,
}

impl FileBlock {
    /// A STORE entry the way WinRAR writes it (LONG_BLOCK set).
    pub fn stored(name: &str, data: &[u8]) -> Self {
        Self {
            flags: LONG_BLOCK,
            packed_low: data.len() as u32,
            unpacked_low: data.len() as u32,
            high: None,
            os: 2,
            crc: 0,
            time: 0,
            version: 29,
            method: 0x30,
            name: name.as_bytes().to_vec(),
            data: data.to_vec(),
        }
    }

    pub fn header_bytes(&self) -> Vec<u8> {
        let flags = if self.high.is_some() {
            self.flags | 0x0100
        } else {
            self.flags
        };
        let head_size = 32 + (if self.high.is_some() { 8 } else { 0 }) + self.name.len();

        let mut out = Vec::with_capacity(head_size);
        out.extend_from_slice(&[0x00, 0x00, 0x74]);
        out.extend_from_slice(&flags.to_le_bytes());
        out.extend_from_slice(&(head_size as u16).to_le_bytes());
        out.extend_from_slice(&self.packed_low.to_le_bytes());
        out.extend_from_slice(&self.unpacked_low.to_le_bytes());
        out.push(self.os);
        out.extend_from_slice(&self.crc.to_le_bytes());
        out.extend_from_slice(&self.time.to_le_bytes());
        out.push(self.version);
        out.push(self.method);
        out.extend_from_slice(&(self.name.len() as u16).to_le_bytes());
        out.extend_from_slice(&0x20u32.to_le_bytes()); // attributes
        if let Some((high_packed, high_unpacked)) = self.high {
            out.extend_from_slice(&high_packed.to_le_bytes());
            out.extend_from_slice(&high_unpacked.to_le_bytes());
        }
        out.extend_from_slice(&self.name);
        out
    }

    pub fn bytes(&self) -> Vec<u8> {
        let mut out = self.header_bytes();
        out.extend_from_slice(&self.data);
        out
    }
}

/// Marker plus a 13-byte main header: 20 bytes.
pub fn archive_head(main_flags: u16) -> Vec<u8> {
    let mut out = Signature::RAR15.to_vec();
    out.extend_from_slice(&[0x00, 0x00, 0x73]);
    out.extend_from_slice(&main_flags.to_le_bytes());
    out.extend_from_slice(&13u16.to_le_bytes());
    out.extend_from_slice(&[0x00; 6]);
    out
}

/// End-of-archive block.
pub const END_BLOCK: [u8; 7] = [0x00, 0x00, 0x7B, 0x00, 0x40, 0x07, 0x00];

/// Archive with the given blocks after the main header, closed by an end block.
pub fn archive(blocks: &[Vec<u8>]) -> Vec<u8> {
    let mut out = archive_head(0);
    for block in blocks {
        out.extend_from_slice(block);
    }
    out.extend_from_slice(&END_BLOCK);
    out
}
