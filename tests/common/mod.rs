//! Shared helpers for materializer integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use directus_image::{
    AssetError, AssetMaterializer, BuildContext, ColumnData, Fetcher, IdentityContext,
    UuidNodeIds,
};

pub const SITE_URL: &str = "https://cms.example";

/// Fetcher that serves a fixed body (or fails) and records every call
pub struct MockFetcher {
    body: Vec<u8>,
    fail: bool,
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn serving(body: &[u8]) -> Arc<Self> {
        Arc::new(Self {
            body: body.to_vec(),
            fail: false,
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            body: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch_to(&self, url: &str, dest: &Path) -> directus_image::Result<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url.to_string());

        if self.fail {
            return Err(AssetError::network(
                url,
                std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset"),
            ));
        }

        tokio::fs::write(dest, &self.body)
            .await
            .map_err(|e| AssetError::filesystem(dest, e))?;
        Ok(self.body.len() as u64)
    }
}

pub fn temp_program_dir() -> PathBuf {
    std::env::temp_dir().join(format!("directus_image_test_{}", uuid::Uuid::new_v4()))
}

pub fn materializer(program_dir: &Path, fetcher: Arc<MockFetcher>) -> AssetMaterializer {
    AssetMaterializer::new(
        BuildContext::new(program_dir, SITE_URL),
        fetcher,
        Arc::new(UuidNodeIds::new()),
    )
}

pub fn identity() -> IdentityContext {
    IdentityContext {
        table_name: "articles".to_string(),
        entry_id: "7".to_string(),
        column: ColumnData {
            id: "cover".to_string(),
            ui: "single_file".to_string(),
            related_table: Some("directus_files".to_string()),
        },
        parent_id: "articles-7".to_string(),
    }
}

pub async fn cleanup(program_dir: &Path) {
    tokio::fs::remove_dir_all(program_dir).await.ok();
}
