//! Error types for RAR parsing and extraction.
//!
//! This module provides the [`RarError`] type which covers everything that can
//! go wrong while walking an archive's headers or pulling a stored entry out of
//! a byte source.
//!
//! ## Error Categories
//!
//! | Category | Errors | Description |
//! |----------|--------|-------------|
//! | Format | [`InvalidArchive`], [`InvalidHeader`] | Source is not a usable RAR4 archive |
//! | Encryption | [`EncryptionUnsupported`] | Archive or entry is encrypted |
//! | Extraction | [`UnsupportedMethod`] | Entry is compressed, only STORE is extracted |
//! | I/O | [`Io`], [`InvalidOffset`], [`BufferTooSmall`] | Byte source failures |
//!
//! ## Example
//!
//! ```rust,ignore
//! use rar_peek::{RarArchive, RarError};
//!
//! match RarArchive::from_local("movie.rar").await {
//!     Ok(archive) => println!("Found {} entries", archive.len()),
//!     Err(RarError::InvalidArchive) => eprintln!("Not a RAR file"),
//!     Err(RarError::EncryptionUnsupported) => eprintln!("Archive is encrypted"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```
//!
//! [`InvalidArchive`]: RarError::InvalidArchive
//! [`InvalidHeader`]: RarError::InvalidHeader
//! [`EncryptionUnsupported`]: RarError::EncryptionUnsupported
//! [`UnsupportedMethod`]: RarError::UnsupportedMethod
//! [`Io`]: RarError::Io
//! [`InvalidOffset`]: RarError::InvalidOffset
//! [`BufferTooSmall`]: RarError::BufferTooSmall

use std::fmt;
use std::io;

/// Error type for RAR operations.
///
/// Every error is terminal for the operation that produced it: a failed
/// [`load`](crate::RarArchive::load) publishes no entries, and a failed
/// extraction returns no partial data.
#[derive(Debug)]
pub enum RarError {
    /// The source does not start with the RAR4 signature, or the block
    /// following it is not a main archive header (`0x73`).
    InvalidArchive,

    /// A block header is malformed (for example it declares a size of zero,
    /// which would never advance the traversal).
    InvalidHeader,

    /// The archive (main header flag `0x80`) or the requested entry
    /// (file header flag `0x04`) is encrypted.
    EncryptionUnsupported,

    /// Extraction was requested for an entry whose method is not STORE.
    ///
    /// The `u8` value is the raw method byte (`0x31`..=`0x35` for the
    /// compressed methods).
    UnsupportedMethod(u8),

    /// A buffer handed to a field decoder is shorter than the field.
    BufferTooSmall {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        have: usize,
    },

    /// A read was requested outside the byte source.
    InvalidOffset {
        /// The requested offset.
        offset: u64,
        /// The actual source length.
        length: u64,
    },

    /// An I/O error occurred in a byte source.
    Io(io::Error),

    /// An HTTP byte source failed (transport error or unexpected status).
    #[cfg(feature = "http")]
    Http(String),
}

impl fmt::Display for RarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArchive => write!(f, "Invalid RAR archive"),
            Self::InvalidHeader => write!(f, "Invalid or malformed header"),
            Self::EncryptionUnsupported => write!(f, "Encrypted archives are not supported"),
            Self::UnsupportedMethod(m) => {
                write!(f, "Compression is not supported (method: 0x{:02x})", m)
            }
            Self::BufferTooSmall { needed, have } => {
                write!(f, "Buffer too small: need {} bytes, have {}", needed, have)
            }
            Self::InvalidOffset { offset, length } => {
                write!(f, "Invalid offset: {} (source length: {})", offset, length)
            }
            Self::Io(e) => write!(f, "IO error: {}", e),
            #[cfg(feature = "http")]
            Self::Http(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for RarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for RarError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for RarError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RarError>;
