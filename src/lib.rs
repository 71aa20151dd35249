//! RAR4 archive listing and stored-entry extraction.
//!
//! Walks the headers of a RAR 1.5-4.x archive over any random-access byte
//! source (a local file, an HTTP resource read with range requests, or an
//! in-memory buffer), produces the list of entries, and extracts entries
//! stored without compression.
//!
//! Compressed entries are listed but not extracted; encrypted archives and
//! RAR5 are rejected.
//!
//! ## Features
//! - Header parsing core needs no features
//! - `async` - Byte sources, archive loading and extraction with tokio
//! - `http` - HTTP range-request byte source with reqwest
//!
//! ## Example
//!
//! ```rust,ignore
//! use rar_peek::RarArchive;
//!
//! let archive = RarArchive::from_local("files.rar").await?;
//! for entry in archive.entries() {
//!     println!("{} ({} bytes, {})", entry.path, entry.size, entry.os);
//! }
//! let blob = archive.extract(&archive.entries()[0]).await?;
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

mod blob;
pub mod codec;
mod entry;
pub mod error;
pub mod formats;
pub mod parsing;

// Async modules (require 'async' feature)
#[cfg(feature = "async")]
pub mod file_media;
#[cfg(feature = "async")]
mod rar_archive;
#[cfg(feature = "async")]
mod rar_file_chunk;

#[cfg(test)]
mod test_support;

pub use blob::{Blob, DEFAULT_CONTENT_TYPE};
pub use codec::TextDecoding;
pub use entry::Entry;
pub use error::RarError;
pub use formats::{CompressionMethod, HostOs};

#[cfg(feature = "async")]
pub use file_media::{FileMedia, LocalFileMedia, MediaFuture, MemoryFileMedia};
#[cfg(feature = "http")]
pub use file_media::{HttpFileMedia, HttpOptions};
#[cfg(feature = "async")]
pub use rar_archive::{ArchiveOptions, LoadState, RarArchive};
#[cfg(feature = "async")]
pub use rar_file_chunk::RarFileChunk;
