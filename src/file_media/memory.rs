use super::{check_range, FileMedia, MediaFuture};
use bytes::Bytes;

/// In-memory byte source.
#[derive(Debug, Clone)]
pub struct MemoryFileMedia {
    name: String,
    data: Bytes,
}

impl MemoryFileMedia {
    pub fn new(name: &str, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.to_string(),
            data: data.into(),
        }
    }
}

impl FileMedia for MemoryFileMedia {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn open(&self) -> MediaFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }

    fn close(&self) -> MediaFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }

    fn read(&self, length: u64, position: u64) -> MediaFuture<'_, Vec<u8>> {
        Box::pin(async move {
            check_range(length, position, self.size())?;
            let start = position as usize;
            Ok(self.data[start..start + length as usize].to_vec())
        })
    }
}
