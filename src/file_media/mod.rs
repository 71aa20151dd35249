//! FileMedia trait - abstract byte source for RAR reading.
//!
//! The library provides three sources: [`LocalFileMedia`] for paths on disk,
//! [`MemoryFileMedia`] for buffers already in memory, and `HttpFileMedia`
//! (feature `http`) for remote files read with HTTP range requests.

mod local;
mod memory;

#[cfg(feature = "http")]
mod http;

pub use local::LocalFileMedia;
pub use memory::MemoryFileMedia;

#[cfg(feature = "http")]
pub use http::{HttpFileMedia, HttpOptions};

use crate::blob::Blob;
use crate::error::{RarError, Result};
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`FileMedia`] methods.
pub type MediaFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Abstract random-access byte source.
///
/// Implement this trait for custom byte sources. A source may not know its
/// size until [`open`](FileMedia::open) has completed. Reads are never issued
/// concurrently by [`RarArchive::load`](crate::RarArchive::load); concurrent
/// extraction calls share the source, so sources that cannot serve
/// overlapping reads must be serialised by the caller.
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
pub trait FileMedia: Send + Sync {
    fn name(&self) -> &str;

    /// Total size in bytes. Zero until opened for lazily sized sources.
    fn size(&self) -> u64;

    fn open(&self) -> MediaFuture<'_, ()>;

    fn close(&self) -> MediaFuture<'_, ()>;

    /// Drop any per-read state. Sources without such state do nothing.
    fn reset(&self) {}

    /// Read exactly `length` bytes starting at `position`.
    fn read(&self, length: u64, position: u64) -> MediaFuture<'_, Vec<u8>>;

    /// Read a range and wrap it as a [`Blob`].
    fn read_blob(
        &self,
        length: u64,
        position: u64,
        content_type: Option<&str>,
    ) -> MediaFuture<'_, Blob> {
        let content_type = content_type.map(str::to_string);
        Box::pin(async move {
            let data = self.read(length, position).await?;
            Ok(Blob::new(data, content_type.as_deref()))
        })
    }
}

/// Reject reads that fall outside `[0, size)`.
pub(crate) fn check_range(length: u64, position: u64, size: u64) -> Result<()> {
    match position.checked_add(length) {
        Some(end) if end <= size => Ok(()),
        _ => Err(RarError::InvalidOffset {
            offset: position,
            length: size,
        }),
    }
}
