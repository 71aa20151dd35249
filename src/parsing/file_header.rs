//! File header parser.
//!
//! Each member of a RAR archive has a file header block (type `0x74`)
//! that describes its name, sizes, compression method and timestamp.
//!
//! Layout relative to the block start:
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 2 | CRC16 |
//! | 2 | 1 | type (`0x74`) |
//! | 3 | 2 | flags |
//! | 5 | 2 | header size |
//! | 7 | 4 | packed size (low) |
//! | 11 | 4 | unpacked size (low) |
//! | 15 | 1 | host OS |
//! | 16 | 4 | file CRC32 |
//! | 20 | 4 | MS-DOS time |
//! | 24 | 1 | version |
//! | 25 | 1 | method |
//! | 26 | 2 | name length |
//! | 28 | 4 | attributes |
//! | 32 | 8 | high packed/unpacked sizes (flag `0x100` only) |
//! | 32/40 | n | name |

use crate::codec::{read_fixed_string, read_u16_le, read_u32_le, read_u8, TextDecoding};
use crate::entry::Entry;
use crate::error::{RarError, Result};
use crate::formats::{parse_dos_datetime, HostOs};

/// File header type constant.
pub const FILE_HEADER_TYPE: u8 = 0x74; // 116

const FLAG_CONTINUES_FROM: u16 = 0x0001;
const FLAG_CONTINUES: u16 = 0x0002;
const FLAG_ENCRYPTED: u16 = 0x0004;
const FLAG_LARGE: u16 = 0x0100;
const FLAG_UNICODE: u16 = 0x0200;

pub struct FileHeaderParser;

impl FileHeaderParser {
    /// Offset of the name when the 64-bit size extension is absent.
    pub const NAME_OFFSET: usize = 32;
    /// Offset of the name when the 64-bit size extension is present.
    pub const LARGE_NAME_OFFSET: usize = 40;

    /// Decode a complete file header block.
    ///
    /// `buffer` holds exactly the block bytes read at `offset`; its length
    /// becomes the entry's `header_size`.
    pub fn parse(buffer: &[u8], offset: u64, decoding: TextDecoding) -> Result<Entry> {
        let flags = read_u16_le(buffer, 3)?;
        let mut size_packed = read_u32_le(buffer, 7)? as u64;
        let mut size = read_u32_le(buffer, 11)? as u64;
        let os = HostOs::from_u8(read_u8(buffer, 15)?);
        let crc = read_u32_le(buffer, 16)?;
        let time = parse_dos_datetime(read_u32_le(buffer, 20)?).unwrap_or_default();
        let version = read_u8(buffer, 24)?;
        let method = read_u8(buffer, 25)?;
        let name_size = read_u16_le(buffer, 26)? as isize;

        let name_offset = if flags & FLAG_LARGE != 0 {
            size_packed |= (read_u32_le(buffer, 32)? as u64) << 32;
            size |= (read_u32_le(buffer, 36)? as u64) << 32;
            Self::LARGE_NAME_OFFSET
        } else {
            Self::NAME_OFFSET
        };

        let mut path = if name_size == 0 {
            String::new()
        } else {
            read_fixed_string(buffer, Some(name_size), name_offset, decoding)?
        };

        // Unicode names are stored after the narrow name, separated by NUL.
        if flags & FLAG_UNICODE != 0 {
            if let Some(wide) = path.split('\0').nth(1) {
                path = wide.to_string();
            }
        }

        let header_size = buffer.len() as u64;
        let block_size = header_size
            .checked_add(size_packed)
            .ok_or(RarError::InvalidHeader)?;

        Ok(Entry {
            name: base_name(&path).to_string(),
            path,
            size,
            size_packed,
            crc,
            offset,
            header_size,
            block_size,
            encrypted: flags & FLAG_ENCRYPTED != 0,
            partial: flags & (FLAG_CONTINUES_FROM | FLAG_CONTINUES) != 0,
            continues_from: flags & FLAG_CONTINUES_FROM != 0,
            continues: flags & FLAG_CONTINUES != 0,
            version,
            method,
            os,
            time,
        })
    }
}

/// Last component of a stored path. DOS separators win over `/`.
fn base_name(path: &str) -> &str {
    match path.rfind('\\') {
        Some(i) => &path[i + 1..],
        None => path.rsplit('/').next().unwrap_or(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FileBlock;

    #[test]
    fn test_parse_file_header() {
        let block = FileBlock::stored("test", b"abcd").header_bytes();
        let entry = FileHeaderParser::parse(&block, 20, TextDecoding::Utf8).unwrap();
        assert_eq!(entry.name, "test");
        assert_eq!(entry.path, "test");
        assert_eq!(entry.offset, 20);
        assert_eq!(entry.size, 4);
        assert_eq!(entry.size_packed, 4);
        assert_eq!(entry.header_size, block.len() as u64);
        assert_eq!(entry.block_size, entry.header_size + entry.size_packed);
        assert!(entry.is_stored());
        assert!(!entry.partial);
    }

    #[test]
    fn test_field_offsets() {
        let mut block = FileBlock::stored("x", b"").header_bytes();
        block[15] = 3; // host OS
        block[16..20].copy_from_slice(&0xDEADBEEFu32.to_le_bytes());
        block[24] = 29; // version
        block[25] = 0x33; // method
        let entry = FileHeaderParser::parse(&block, 0, TextDecoding::Utf8).unwrap();
        assert_eq!(entry.os, HostOs::Unix);
        assert_eq!(entry.crc, 0xDEADBEEF);
        assert_eq!(entry.version, 29);
        assert_eq!(entry.method, 0x33);
        assert!(!entry.is_stored());
    }

    #[test]
    fn test_large_sizes() {
        let mut fb = FileBlock::stored("big.bin", b"");
        fb.packed_low = 10;
        fb.unpacked_low = 0xFFFF_FFFF;
        fb.high = Some((1, 2));
        let entry = FileHeaderParser::parse(&fb.header_bytes(), 0, TextDecoding::Utf8).unwrap();
        assert_eq!(entry.size_packed, 10 + (1u64 << 32));
        assert_eq!(entry.size, 0xFFFF_FFFF + 2 * (1u64 << 32));
        assert_eq!(entry.name, "big.bin");
        assert_eq!(entry.block_size, entry.header_size + entry.size_packed);
    }

    #[test]
    fn test_sizes_without_large_flag() {
        let mut fb = FileBlock::stored("n", b"");
        fb.unpacked_low = 0xFFFF_FFFF;
        let entry = FileHeaderParser::parse(&fb.header_bytes(), 0, TextDecoding::Utf8).unwrap();
        assert_eq!(entry.size, 0xFFFF_FFFF);
    }

    #[test]
    fn test_unicode_name_replaces_narrow() {
        let mut fb = FileBlock::stored("", b"");
        fb.name = b"narrow.txt\0wide.txt".to_vec();
        fb.flags |= FLAG_UNICODE;
        let entry = FileHeaderParser::parse(&fb.header_bytes(), 0, TextDecoding::Utf8).unwrap();
        assert_eq!(entry.path, "wide.txt");

        // Without the flag the NUL is kept verbatim
        fb.flags &= !FLAG_UNICODE;
        let entry = FileHeaderParser::parse(&fb.header_bytes(), 0, TextDecoding::Utf8).unwrap();
        assert_eq!(entry.path, "narrow.txt\0wide.txt");
    }

    #[test]
    fn test_name_from_path() {
        assert_eq!(base_name("dir\\sub\\file.txt"), "file.txt");
        assert_eq!(base_name("dir/sub/file.txt"), "file.txt");
        assert_eq!(base_name("a/b\\c"), "c");
        assert_eq!(base_name("plain"), "plain");
        assert_eq!(base_name("dir/"), "");
    }

    #[test]
    fn test_flags() {
        let mut fb = FileBlock::stored("part", b"");
        fb.flags |= FLAG_CONTINUES | FLAG_ENCRYPTED;
        let entry = FileHeaderParser::parse(&fb.header_bytes(), 0, TextDecoding::Utf8).unwrap();
        assert!(entry.partial);
        assert!(entry.continues);
        assert!(!entry.continues_from);
        assert!(entry.encrypted);
    }

    #[test]
    fn test_raw_decoding() {
        let mut fb = FileBlock::stored("", b"");
        fb.name = "ü".as_bytes().to_vec();
        let entry = FileHeaderParser::parse(&fb.header_bytes(), 0, TextDecoding::Raw).unwrap();
        assert_eq!(entry.name, "\u{c3}\u{bc}");
        let entry = FileHeaderParser::parse(&fb.header_bytes(), 0, TextDecoding::Utf8).unwrap();
        assert_eq!(entry.name, "ü");
    }

    #[test]
    fn test_time() {
        let mut fb = FileBlock::stored("t", b"");
        fb.time = 20 << 25 | 6 << 21 | 15 << 16 | 10 << 11 | 30 << 5;
        let entry = FileHeaderParser::parse(&fb.header_bytes(), 0, TextDecoding::Utf8).unwrap();
        assert_eq!(entry.time.to_string(), "2000-06-15 10:30:00");
    }

    #[test]
    fn test_block_size_overflow() {
        let mut fb = FileBlock::stored("huge", b"");
        fb.packed_low = u32::MAX;
        fb.high = Some((u32::MAX, 0));
        assert!(matches!(
            FileHeaderParser::parse(&fb.header_bytes(), 0, TextDecoding::Utf8),
            Err(RarError::InvalidHeader)
        ));
    }

    #[test]
    fn test_truncated_name() {
        let mut block = FileBlock::stored("name", b"").header_bytes();
        block.truncate(34);
        assert!(matches!(
            FileHeaderParser::parse(&block, 0, TextDecoding::Utf8),
            Err(RarError::BufferTooSmall { .. })
        ));
        assert!(FileHeaderParser::parse(&block[..20], 0, TextDecoding::Utf8).is_err());
    }
}
