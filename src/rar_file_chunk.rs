//! RarFileChunk - the payload byte range of one entry.

use crate::blob::Blob;
use crate::entry::Entry;
use crate::error::Result;
use crate::file_media::FileMedia;
use std::fmt;
use std::sync::Arc;

/// An inclusive byte range within a [`FileMedia`].
#[derive(Clone)]
pub struct RarFileChunk {
    file_media: Arc<dyn FileMedia>,
    pub start_offset: u64,
    pub end_offset: u64,
}

impl fmt::Debug for RarFileChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RarFileChunk")
            .field("file_name", &self.file_media.name())
            .field("start_offset", &self.start_offset)
            .field("end_offset", &self.end_offset)
            .finish()
    }
}

impl RarFileChunk {
    pub fn new(file_media: Arc<dyn FileMedia>, start_offset: u64, end_offset: u64) -> Self {
        Self {
            file_media,
            start_offset,
            end_offset,
        }
    }

    /// The payload of `entry`: from the end of its header up to the last
    /// byte of its block, `offset + (block_size - 1)`.
    pub fn for_entry(file_media: Arc<dyn FileMedia>, entry: &Entry) -> Self {
        Self::new(
            file_media,
            entry.data_offset(),
            entry
                .offset
                .saturating_add(entry.block_size.saturating_sub(1)),
        )
    }

    /// Length of this chunk in bytes.
    pub fn length(&self) -> u64 {
        if self.end_offset >= self.start_offset {
            (self.end_offset - self.start_offset).saturating_add(1)
        } else {
            0
        }
    }

    /// Read the entire chunk. Empty chunks do not touch the media.
    pub async fn read(&self) -> Result<Vec<u8>> {
        let length = self.length();
        if length == 0 {
            return Ok(Vec::new());
        }
        self.file_media.read(length, self.start_offset).await
    }

    /// Read the entire chunk as a [`Blob`].
    pub async fn read_blob(&self, content_type: Option<&str>) -> Result<Blob> {
        let length = self.length();
        if length == 0 {
            return Ok(Blob::new(Vec::new(), content_type));
        }
        self.file_media
            .read_blob(length, self.start_offset, content_type)
            .await
    }

    pub fn volume_name(&self) -> &str {
        self.file_media.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_media::MemoryFileMedia;
    use crate::parsing::FileHeaderParser;
    use crate::test_support::FileBlock;
    use crate::TextDecoding;

    fn media(data: Vec<u8>) -> Arc<dyn FileMedia> {
        Arc::new(MemoryFileMedia::new("chunk.rar", data))
    }

    #[test]
    fn test_length() {
        let m = media(vec![0; 8]);
        assert_eq!(RarFileChunk::new(m.clone(), 2, 5).length(), 4);
        assert_eq!(RarFileChunk::new(m.clone(), 3, 3).length(), 1);
        assert_eq!(RarFileChunk::new(m, 4, 3).length(), 0);
    }

    #[tokio::test]
    async fn test_entry_payload_range() {
        let mut data = vec![0xEE; 5];
        let fb = FileBlock::stored("a.txt", b"abcd");
        let header = fb.header_bytes();
        data.extend_from_slice(&fb.bytes());
        data.extend_from_slice(b"trailing");

        let entry = FileHeaderParser::parse(&header, 5, TextDecoding::Utf8).unwrap();
        let chunk = RarFileChunk::for_entry(media(data), &entry);
        assert_eq!(chunk.start_offset, 5 + header.len() as u64);
        assert_eq!(chunk.end_offset, 5 + entry.block_size - 1);
        assert_eq!(chunk.length(), entry.size_packed);
        assert_eq!(chunk.read().await.unwrap(), b"abcd");
        assert_eq!(chunk.volume_name(), "chunk.rar");
    }

    #[tokio::test]
    async fn test_empty_payload_skips_read() {
        // Media too short to serve any read: an empty chunk must not ask.
        let fb = FileBlock::stored("empty", b"");
        let entry = FileHeaderParser::parse(&fb.header_bytes(), 0, TextDecoding::Utf8).unwrap();
        let chunk = RarFileChunk::for_entry(media(Vec::new()), &entry);
        assert_eq!(chunk.length(), 0);
        let blob = chunk.read_blob(Some("text/plain")).await.unwrap();
        assert!(blob.is_empty());
        assert_eq!(blob.content_type(), "text/plain");
    }
}
