use super::{check_range, FileMedia, MediaFuture};
use crate::error::{RarError, Result};
use reqwest::header::{CONTENT_LENGTH, RANGE};
use reqwest::{Client, StatusCode};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Settings for [`HttpFileMedia`].
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Attempts per request when the failure is a timeout or connect error.
    pub max_retry: u32,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retry: 3,
        }
    }
}

/// Remote file read with HTTP range requests.
///
/// [`open`](FileMedia::open) sends a `HEAD` request to learn the size from
/// `Content-Length`; each read is a `GET` with a `Range` header.
#[derive(Debug)]
pub struct HttpFileMedia {
    client: Client,
    url: String,
    name: String,
    options: HttpOptions,
    size: AtomicU64,
    transferred_bytes: AtomicU64,
}

impl HttpFileMedia {
    pub fn new(url: &str) -> Result<Self> {
        Self::with_options(url, HttpOptions::default())
    }

    pub fn with_options(url: &str, options: HttpOptions) -> Result<Self> {
        let client = Client::builder().timeout(options.timeout).build()?;
        let name = url
            .split(['?', '#'])
            .next()
            .and_then(|path| path.rsplit('/').next())
            .filter(|n| !n.is_empty())
            .unwrap_or("unknown")
            .to_string();

        Ok(Self {
            client,
            url: url.to_string(),
            name,
            options,
            size: AtomicU64::new(0),
            transferred_bytes: AtomicU64::new(0),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Total payload bytes received by range reads so far.
    pub fn transferred_bytes(&self) -> u64 {
        self.transferred_bytes.load(Ordering::Relaxed)
    }

    /// Send a request, retrying transient transport failures with a linear
    /// backoff.
    async fn send(&self, request: impl Fn() -> reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let mut attempt = 0;
        loop {
            match request().send().await {
                Ok(resp) => return Ok(resp),
                Err(e) if (e.is_timeout() || e.is_connect()) && attempt + 1 < self.options.max_retry => {
                    attempt += 1;
                    tracing::warn!(
                        "Connection error for {}, retry {}/{}: {}",
                        self.url,
                        attempt,
                        self.options.max_retry,
                        e
                    );
                    tokio::time::sleep(Duration::from_millis(500 * attempt as u64)).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl FileMedia for HttpFileMedia {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size.load(Ordering::Acquire)
    }

    fn open(&self) -> MediaFuture<'_, ()> {
        Box::pin(async move {
            let resp = self.send(|| self.client.head(&self.url)).await?;
            if !resp.status().is_success() {
                return Err(RarError::Http(format!(
                    "Could not open URI, status: {}",
                    resp.status()
                )));
            }

            let size = resp
                .headers()
                .get(CONTENT_LENGTH)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .ok_or_else(|| RarError::Http("Remote server did not return Content-Length".into()))?;

            tracing::debug!("Opened {} ({} bytes)", self.url, size);
            self.size.store(size, Ordering::Release);
            Ok(())
        })
    }

    fn close(&self) -> MediaFuture<'_, ()> {
        Box::pin(async { Ok(()) })
    }

    fn read(&self, length: u64, position: u64) -> MediaFuture<'_, Vec<u8>> {
        Box::pin(async move {
            check_range(length, position, self.size())?;
            if length == 0 {
                return Ok(Vec::new());
            }

            let range = format!("bytes={}-{}", position, position + length - 1);
            let resp = self
                .send(|| self.client.get(&self.url).header(RANGE, &range))
                .await?;

            let status = resp.status();
            if !status.is_success() {
                return Err(RarError::Http(format!(
                    "Could not fetch URI, status: {}",
                    status
                )));
            }

            let body = resp.bytes().await?;
            // A server that ignores Range answers 200 with the whole file.
            let start = if status == StatusCode::PARTIAL_CONTENT {
                0
            } else {
                position as usize
            };
            let end = start + length as usize;
            if body.len() < end {
                return Err(RarError::Http(format!(
                    "Short read: wanted {} bytes at {}, got {}",
                    length,
                    position,
                    body.len().saturating_sub(start)
                )));
            }

            self.transferred_bytes
                .fetch_add(length, Ordering::Relaxed);
            Ok(body[start..end].to_vec())
        })
    }
}
