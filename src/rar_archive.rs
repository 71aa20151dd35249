//! RarArchive - RAR4 archive loader and stored-entry extraction.

use crate::blob::{Blob, DEFAULT_CONTENT_TYPE};
use crate::codec::TextDecoding;
use crate::entry::Entry;
use crate::error::{RarError, Result};
use crate::file_media::{FileMedia, LocalFileMedia, MemoryFileMedia};
use crate::formats::Signature;
use crate::parsing::file_header::FILE_HEADER_TYPE;
use crate::parsing::{
    ArchiveHeaderParser, BlockHeaderParser, FileHeaderParser, HeaderType, MarkerHeaderParser,
};
use crate::rar_file_chunk::RarFileChunk;
use bytes::Bytes;
use std::path::Path;
use std::sync::Arc;

/// Bytes read up front: the marker plus the main header prefix.
const BASE_HEADER_READ: u64 = 14;

/// Options fixed when an archive is created.
#[derive(Debug, Clone)]
pub struct ArchiveOptions {
    /// How entry names are decoded.
    pub text_decoding: TextDecoding,
    /// Content type given to extracted blobs by [`RarArchive::extract`].
    pub content_type: String,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            text_decoding: TextDecoding::default(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }
}

/// Where an archive is in its one-shot load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unvalidated,
    Validating,
    Loaded,
    Failed,
}

/// A RAR4 archive bound to a byte source.
///
/// The source is shared, not owned: closing it is up to whoever created it
/// (or [`RarArchive::close`]).
pub struct RarArchive {
    media: Arc<dyn FileMedia>,
    options: ArchiveOptions,
    entries: Vec<Entry>,
    state: LoadState,
}

impl std::fmt::Debug for RarArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RarArchive")
            .field("media", &self.media.name())
            .field("state", &self.state)
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl RarArchive {
    pub fn new(media: Arc<dyn FileMedia>) -> Self {
        Self::with_options(media, ArchiveOptions::default())
    }

    pub fn with_options(media: Arc<dyn FileMedia>, options: ArchiveOptions) -> Self {
        Self {
            media,
            options,
            entries: Vec::new(),
            state: LoadState::Unvalidated,
        }
    }

    /// Create and load an archive over `media`.
    pub async fn from_media(media: Arc<dyn FileMedia>) -> Result<Self> {
        let mut archive = Self::new(media);
        archive.load().await?;
        Ok(archive)
    }

    pub async fn from_local(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_media(Arc::new(LocalFileMedia::new(path))).await
    }

    #[cfg(feature = "http")]
    pub async fn from_uri(url: &str) -> Result<Self> {
        Self::from_media(Arc::new(crate::file_media::HttpFileMedia::new(url)?)).await
    }

    pub async fn from_bytes(data: impl Into<Bytes>) -> Result<Self> {
        Self::from_media(Arc::new(MemoryFileMedia::new("memory", data))).await
    }

    /// Walk the archive and collect its entries.
    ///
    /// Does nothing once loaded. On failure no entries are published and the
    /// archive is left in [`LoadState::Failed`]; calling `load` again starts
    /// over.
    pub async fn load(&mut self) -> Result<()> {
        if self.state == LoadState::Loaded {
            return Ok(());
        }

        self.state = LoadState::Validating;
        self.entries.clear();

        match Self::read_entries(self.media.as_ref(), &self.options).await {
            Ok(entries) => {
                tracing::debug!(
                    "Loaded {} entries from {}",
                    entries.len(),
                    self.media.name()
                );
                self.entries = entries;
                self.state = LoadState::Loaded;
                Ok(())
            }
            Err(e) => {
                tracing::debug!("Failed to load {}: {}", self.media.name(), e);
                self.state = LoadState::Failed;
                Err(e)
            }
        }
    }

    async fn read_entries(media: &dyn FileMedia, options: &ArchiveOptions) -> Result<Vec<Entry>> {
        media.open().await?;
        let size = media.size();

        let head = media.read(BASE_HEADER_READ.min(size), 0).await?;
        MarkerHeaderParser::parse(&head).map_err(|_| RarError::InvalidArchive)?;
        let main = ArchiveHeaderParser::parse(&head[MarkerHeaderParser::HEADER_SIZE..])
            .map_err(|e| match e {
                RarError::BufferTooSmall { .. } => RarError::InvalidArchive,
                e => e,
            })?;

        if main.is_block_encoded {
            return Err(RarError::EncryptionUnsupported);
        }
        tracing::debug!(
            "Main header of {}: {} bytes, volume={}, solid={}",
            media.name(),
            main.size,
            main.is_volume,
            main.is_solid
        );

        let mut entries = Vec::new();
        if size <= BASE_HEADER_READ {
            return Ok(entries);
        }

        let mut cursor = main.size as u64 + Signature::size();
        while cursor < size {
            let prefix_len = (BlockHeaderParser::HEADER_SIZE as u64).min(size - cursor);
            let prefix = media.read(prefix_len, cursor).await?;
            let block = BlockHeaderParser::parse(&prefix)?;

            let step = if block.header_type == FILE_HEADER_TYPE {
                // ADD_SIZE of a file block is its packed size, which the
                // entry already accounts for in `block_size`.
                let header = media.read(block.head_size as u64, cursor).await?;
                let entry = FileHeaderParser::parse(&header, cursor, options.text_decoding)?;
                tracing::debug!(
                    "Found entry {} at {} ({} bytes packed)",
                    entry.path,
                    entry.offset,
                    entry.size_packed
                );
                let step = entry.block_size;
                entries.push(entry);
                step
            } else {
                tracing::trace!(
                    "Skipping {:?} block (0x{:02x}) at {} ({} bytes)",
                    HeaderType::from_u8(block.header_type),
                    block.header_type,
                    cursor,
                    block.size()
                );
                block.size()
            };

            if step == 0 {
                return Err(RarError::InvalidHeader);
            }
            cursor = cursor.checked_add(step).ok_or(RarError::InvalidHeader)?;
        }

        Ok(entries)
    }

    /// Fetch the payload of a stored entry as a blob tagged with the
    /// archive's default content type.
    pub async fn extract(&self, entry: &Entry) -> Result<Blob> {
        self.extract_as(entry, &self.options.content_type).await
    }

    /// Fetch the payload of a stored entry with an explicit content type.
    pub async fn extract_as(&self, entry: &Entry, content_type: &str) -> Result<Blob> {
        if !entry.is_stored() {
            return Err(RarError::UnsupportedMethod(entry.method));
        }
        if entry.encrypted {
            return Err(RarError::EncryptionUnsupported);
        }

        RarFileChunk::for_entry(self.media.clone(), entry)
            .read_blob(Some(content_type))
            .await
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// First entry whose stored path equals `path`.
    pub fn find(&self, path: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.path == path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn options(&self) -> &ArchiveOptions {
        &self.options
    }

    pub fn media(&self) -> &Arc<dyn FileMedia> {
        &self.media
    }

    pub async fn close(&self) -> Result<()> {
        self.media.close().await
    }
}
