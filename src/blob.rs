//! Blob - extracted bytes tagged with a content type.

use bytes::Bytes;

/// Content type used when the caller does not supply one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// An opaque binary object, the result of extracting an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    data: Bytes,
    content_type: String,
}

impl Blob {
    pub fn new(data: impl Into<Bytes>, content_type: Option<&str>) -> Self {
        Self {
            data: data.into(),
            content_type: content_type.unwrap_or(DEFAULT_CONTENT_TYPE).to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn into_bytes(self) -> Bytes {
        self.data
    }
}

impl AsRef<[u8]> for Blob {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
