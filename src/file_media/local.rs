use super::{check_range, FileMedia, MediaFuture};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::io::{AsyncReadExt, AsyncSeekExt};

/// Local file implementation.
///
/// The size is learned on [`open`](FileMedia::open); every read opens the
/// file afresh, so no descriptor is held between calls.
#[derive(Debug)]
pub struct LocalFileMedia {
    path: PathBuf,
    name: String,
    length: AtomicU64,
}

impl LocalFileMedia {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        Self {
            path,
            name,
            length: AtomicU64::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FileMedia for LocalFileMedia {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.length.load(Ordering::Acquire)
    }

    fn open(&self) -> MediaFuture<'_, ()> {
        Box::pin(async move {
            let metadata = tokio::fs::metadata(&self.path).await?;
            self.length.store(metadata.len(), Ordering::Release);
            Ok(())
        })
    }

    fn close(&self) -> MediaFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }

    fn read(&self, length: u64, position: u64) -> MediaFuture<'_, Vec<u8>> {
        Box::pin(async move {
            check_range(length, position, self.size())?;
            let mut file = tokio::fs::File::open(&self.path).await?;
            file.seek(std::io::SeekFrom::Start(position)).await?;
            let mut buffer = vec![0u8; length as usize];
            file.read_exact(&mut buffer).await?;
            Ok(buffer)
        })
    }
}
