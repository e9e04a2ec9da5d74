use std::path::Path;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument, warn};

use crate::error::{AssetError, Result};

/// Downloads a remote file into a local path
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url` and write the body to `dest`, returning the bytes written.
    ///
    /// `dest` is truncated first. On error it may be left partially written.
    async fn fetch_to(&self, url: &str, dest: &Path) -> Result<u64>;
}

/// Single-shot HTTP GET, streamed to disk.
///
/// No retries and no timeout. The response status is not checked: whatever
/// body the server returns is written.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        HttpFetcher {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        HttpFetcher { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_to(&self, url: &str, dest: &Path) -> Result<u64> {
        info!("Syncing image from Directus: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AssetError::network(url, e))?;
        if !response.status().is_success() {
            warn!(status = %response.status(), "Directus returned a non-success status for {}", url);
        }

        let mut file = fs::File::create(dest)
            .await
            .map_err(|e| AssetError::filesystem(dest, e))?;

        let mut written = 0u64;
        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| AssetError::network(url, e))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| AssetError::filesystem(dest, e))?;
            written += chunk.len() as u64;
        }

        // Wait for the data to reach disk before anyone hashes it
        file.sync_all()
            .await
            .map_err(|e| AssetError::filesystem(dest, e))?;

        info!("Image successfully downloaded, local path: {}", dest.display());
        Ok(written)
    }
}
