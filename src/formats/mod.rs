//! RAR4 format constants: signature, host OS, compression methods and
//! MS-DOS timestamps.

use chrono::{Months, NaiveDate, NaiveDateTime, TimeDelta};
use std::fmt;

/// RAR 1.5 to 4.x file signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature;

impl Signature {
    pub const RAR15: &[u8; 7] = b"Rar!\x1a\x07\x00";
    /// Not supported, only recognised so callers can report it.
    pub const RAR50: &[u8; 8] = b"Rar!\x1a\x07\x01\x00";

    pub fn size() -> u64 {
        Self::RAR15.len() as u64
    }

    pub fn matches(data: &[u8]) -> bool {
        data.len() >= 7 && data[..7] == Self::RAR15[..]
    }

    pub fn is_rar5(data: &[u8]) -> bool {
        data.starts_with(Self::RAR50)
    }
}

/// Operating system that created an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostOs {
    MsDos,
    Os2,
    Windows,
    Unix,
    Mac,
    BeOs,
    Unknown,
}

impl HostOs {
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => Self::MsDos,
            1 => Self::Os2,
            2 => Self::Windows,
            3 => Self::Unix,
            4 => Self::Mac,
            5 => Self::BeOs,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MsDos => "MS-DOS",
            Self::Os2 => "OS/2",
            Self::Windows => "Windows",
            Self::Unix => "Unix",
            Self::Mac => "Mac",
            Self::BeOs => "BeOS",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compression methods used in RAR4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CompressionMethod {
    /// Store (no compression)
    Store = 0x30,
    /// Fastest compression
    Fastest = 0x31,
    /// Fast compression
    Fast = 0x32,
    /// Normal compression
    Normal = 0x33,
    /// Good compression
    Good = 0x34,
    /// Best compression
    Best = 0x35,
}

impl CompressionMethod {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0x30 => Some(Self::Store),
            0x31 => Some(Self::Fastest),
            0x32 => Some(Self::Fast),
            0x33 => Some(Self::Normal),
            0x34 => Some(Self::Good),
            0x35 => Some(Self::Best),
            _ => None,
        }
    }

    /// Whether this method requires decompression.
    pub fn needs_decompression(&self) -> bool {
        *self != Self::Store
    }
}

/// Decode a packed MS-DOS date/time.
///
/// Bit groups from the top: 7 bits years since 1980, 4 bits month (1-based),
/// 5 bits day, 5 bits hour, 6 bits minute, 5 bits seconds/2. Out-of-range
/// fields roll over into the neighbouring unit (month 0 is December of the
/// previous year, day 0 the last day of the previous month).
pub fn parse_dos_datetime(dos_time: u32) -> Option<NaiveDateTime> {
    let year = (dos_time >> 25) as i32 + 1980;
    let month = (dos_time >> 21) & 0x0f;
    let day = ((dos_time >> 16) & 0x1f) as i64;
    let hour = ((dos_time >> 11) & 0x1f) as i64;
    let minute = ((dos_time >> 5) & 0x3f) as i64;
    let second = ((dos_time & 0x1f) * 2) as i64;

    let jan_first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let month_start = if month == 0 {
        jan_first.checked_sub_months(Months::new(1))?
    } else {
        jan_first.checked_add_months(Months::new(month - 1))?
    };

    let secs = (day - 1) * 86_400 + hour * 3_600 + minute * 60 + second;
    month_start
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(TimeDelta::try_seconds(secs)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack(y: u32, mo: u32, d: u32, h: u32, mi: u32, s2: u32) -> u32 {
        y << 25 | mo << 21 | d << 16 | h << 11 | mi << 5 | s2
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_signature() {
        assert!(Signature::matches(b"Rar!\x1a\x07\x00\x00"));
        assert!(!Signature::matches(b"Rar!\x1a\x07\x01\x00"));
        assert!(Signature::is_rar5(b"Rar!\x1a\x07\x01\x00"));
        assert!(!Signature::matches(b"Rar!"));
        assert_eq!(Signature::size(), 7);
    }

    #[test]
    fn test_host_os_names() {
        let names: Vec<_> = (0..=5).map(|v| HostOs::from_u8(v).to_string()).collect();
        assert_eq!(names, ["MS-DOS", "OS/2", "Windows", "Unix", "Mac", "BeOS"]);
        assert_eq!(HostOs::from_u8(7).to_string(), "Unknown");
        assert_eq!(HostOs::from_u8(255), HostOs::Unknown);
    }

    #[test]
    fn test_compression_method() {
        assert_eq!(CompressionMethod::from_u8(0x30), Some(CompressionMethod::Store));
        assert_eq!(CompressionMethod::from_u8(0x35), Some(CompressionMethod::Best));
        assert_eq!(CompressionMethod::from_u8(0x36), None);
        assert!(!CompressionMethod::Store.needs_decompression());
        assert!(CompressionMethod::Normal.needs_decompression());
    }

    #[test]
    fn test_dos_datetime() {
        let t = parse_dos_datetime(pack(20, 6, 15, 10, 30, 0)).unwrap();
        assert_eq!(t, at(2000, 6, 15, 10, 30, 0));

        let t = parse_dos_datetime(pack(44, 12, 31, 23, 59, 29)).unwrap();
        assert_eq!(t, at(2024, 12, 31, 23, 59, 58));
    }

    #[test]
    fn test_dos_datetime_rolls_over() {
        // All-zero field: month 0, day 0 of 1980
        assert_eq!(parse_dos_datetime(0).unwrap(), at(1979, 11, 30, 0, 0, 0));
        // Month 13 is January of the next year
        assert_eq!(
            parse_dos_datetime(pack(0, 13, 1, 0, 0, 0)).unwrap(),
            at(1981, 1, 1, 0, 0, 0)
        );
        // Hour 25 spills into the next day
        assert_eq!(
            parse_dos_datetime(pack(0, 1, 1, 25, 0, 0)).unwrap(),
            at(1980, 1, 2, 1, 0, 0)
        );
        assert!(parse_dos_datetime(u32::MAX).is_some());
    }
}
