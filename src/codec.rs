//! Primitive field decoders.
//!
//! Stateless helpers for the on-disk representations found in RAR headers
//! (and a few neighbouring formats): fixed-length narrow and UTF-16 strings,
//! synchsafe integers, 24-bit integers and bounds-checked little-endian reads.

use crate::error::{RarError, Result};

/// How narrow (single-byte) strings are turned into text.
///
/// Chosen once, in [`ArchiveOptions`](crate::ArchiveOptions), and passed down
/// to every decoder that needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDecoding {
    /// Decode the bytes as UTF-8. Invalid sequences become U+FFFD.
    #[default]
    Utf8,
    /// Map every byte to the char with the same code point (Latin-1).
    Raw,
}

impl TextDecoding {
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::Raw => bytes.iter().map(|&b| char::from(b)).collect(),
        }
    }
}

/// Resolve a `(length, offset)` request against a buffer.
///
/// `None` means "everything after `offset`"; a negative length is added to
/// the buffer length, so `-n` drops the last `n` bytes of the buffer.
fn resolve_range(buf: &[u8], length: Option<isize>, offset: usize) -> Result<(usize, usize)> {
    let len = match length {
        None | Some(0) => buf.len().saturating_sub(offset),
        Some(n) if n > 0 => n as usize,
        Some(n) => {
            let n = buf.len() as isize + n;
            if n < 0 {
                return Err(RarError::BufferTooSmall {
                    needed: n.unsigned_abs(),
                    have: buf.len(),
                });
            }
            n as usize
        }
    };
    let end = offset.checked_add(len).ok_or(RarError::InvalidHeader)?;
    if end > buf.len() {
        return Err(RarError::BufferTooSmall {
            needed: end,
            have: buf.len(),
        });
    }
    Ok((offset, end))
}

/// Decode a fixed-length single-byte string.
pub fn read_fixed_string(
    buf: &[u8],
    length: Option<isize>,
    offset: usize,
    decoding: TextDecoding,
) -> Result<String> {
    let (start, end) = resolve_range(buf, length, offset)?;
    Ok(decoding.decode(&buf[start..end]))
}

/// Decode a UTF-16 string.
///
/// Code units are big-endian unless `use_bom` is set and the first two bytes
/// are `FF FE`. With `use_bom` the marker is always consumed.
pub fn read_utf16_string(
    buf: &[u8],
    length: Option<isize>,
    offset: usize,
    use_bom: bool,
) -> Result<String> {
    let (mut start, end) = resolve_range(buf, length, offset)?;
    let mut little_endian = false;

    if use_bom {
        if end < start + 2 {
            return Err(RarError::BufferTooSmall {
                needed: start + 2,
                have: end,
            });
        }
        little_endian = u16::from_be_bytes([buf[start], buf[start + 1]]) == 0xFFFE;
        start += 2;
    }

    let units = buf[start..end].chunks_exact(2).map(|pair| {
        if little_endian {
            u16::from_le_bytes([pair[0], pair[1]])
        } else {
            u16::from_be_bytes([pair[0], pair[1]])
        }
    });

    Ok(char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect())
}

/// Strip the padding bit out of every byte of a synchsafe integer.
pub fn synch(value: u32) -> u32 {
    let mut out = 0u32;
    let mut mask = 0x7f00_0000u32;
    while mask != 0 {
        out >>= 1;
        out |= value & mask;
        mask >>= 8;
    }
    out
}

pub fn read_synchsafe_u8(buf: &[u8], offset: usize) -> Result<u32> {
    let b = *buf.get(offset).ok_or(RarError::BufferTooSmall {
        needed: offset + 1,
        have: buf.len(),
    })?;
    Ok(synch(b as u32))
}

/// Read a big-endian synchsafe 32-bit integer (28 significant bits).
pub fn read_synchsafe_u32(buf: &[u8], offset: usize) -> Result<u32> {
    let b = take::<4>(buf, offset)?;
    Ok(synch(u32::from_be_bytes(b)))
}

pub fn read_u24(buf: &[u8], offset: usize, little_endian: bool) -> Result<u32> {
    let [a, b, c] = take::<3>(buf, offset)?;
    if little_endian {
        Ok(a as u32 | (b as u32) << 8 | (c as u32) << 16)
    } else {
        Ok(c as u32 | (b as u32) << 8 | (a as u32) << 16)
    }
}

pub fn read_u8(buf: &[u8], offset: usize) -> Result<u8> {
    let [b] = take::<1>(buf, offset)?;
    Ok(b)
}

pub fn read_u16_le(buf: &[u8], offset: usize) -> Result<u16> {
    Ok(u16::from_le_bytes(take::<2>(buf, offset)?))
}

pub fn read_u32_le(buf: &[u8], offset: usize) -> Result<u32> {
    Ok(u32::from_le_bytes(take::<4>(buf, offset)?))
}

fn take<const N: usize>(buf: &[u8], offset: usize) -> Result<[u8; N]> {
    let end = offset.checked_add(N).ok_or(RarError::InvalidHeader)?;
    buf.get(offset..end)
        .and_then(|s| s.try_into().ok())
        .ok_or(RarError::BufferTooSmall {
            needed: end,
            have: buf.len(),
        })
}
