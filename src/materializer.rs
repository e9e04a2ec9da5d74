//! Ensures a local copy of a Directus file exists and describes it as a node.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex as StdMutex, PoisonError};

use config::BuildContext;
use tokio::fs;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, instrument};

use crate::descriptor::{FileDescriptor, IdentityContext};
use crate::digest::file_digest;
use crate::error::{AssetError, Result};
use crate::fetch::Fetcher;
use crate::node_id::NodeIdAllocator;
use crate::paths;
use crate::record::{AssetRecord, Internal};

/// Placeholder written to the cache when a column has no file
pub const DEFAULT_IMAGE: &[u8] = include_bytes!("../assets/default.png");

/// Where the bytes of a record come from, before hashing
struct Resolved {
    local_path: PathBuf,
    content: String,
    name: String,
    extension: String,
    title: Option<String>,
    caption: Option<String>,
}

pub struct AssetMaterializer {
    context: BuildContext,
    fetcher: Arc<dyn Fetcher>,
    ids: Arc<dyn NodeIdAllocator>,
    /// Set once the placeholder has been written for this materializer
    default_copied: OnceCell<()>,
    /// Per-path locks so concurrent callers share one download
    in_flight: LockRegistry,
}

type LockRegistry = StdMutex<HashMap<PathBuf, Arc<Mutex<()>>>>;

/// A caller's claim on one path's lock.
///
/// Dropping it (including when the owning future is cancelled) removes the
/// registry entry once no other caller holds the lock.
struct PathLease<'a> {
    registry: &'a LockRegistry,
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl<'a> PathLease<'a> {
    fn acquire(registry: &'a LockRegistry, path: &Path) -> Self {
        let lock = registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(path.to_path_buf())
            .or_default()
            .clone();
        Self {
            registry,
            path: path.to_path_buf(),
            lock,
        }
    }
}

impl Drop for PathLease<'_> {
    fn drop(&mut self) {
        let mut locks = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        // Only the registry and this lease hold it: nobody is waiting
        if Arc::strong_count(&self.lock) == 2 {
            locks.remove(&self.path);
        }
    }
}

impl AssetMaterializer {
    pub fn new(
        context: BuildContext,
        fetcher: Arc<dyn Fetcher>,
        ids: Arc<dyn NodeIdAllocator>,
    ) -> Self {
        Self {
            context,
            fetcher,
            ids,
            default_copied: OnceCell::new(),
            in_flight: StdMutex::new(HashMap::new()),
        }
    }

    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    /// Whether the placeholder image has been written during this lifetime
    pub fn default_copied(&self) -> bool {
        self.default_copied.initialized()
    }

    /// Cache path a descriptor maps to; `None` maps to the placeholder
    pub fn local_path(&self, descriptor: Option<&FileDescriptor>) -> PathBuf {
        let cache_dir = self.context.directus_cache_dir();
        match descriptor.and_then(FileDescriptor::remote_path) {
            Some(url) => paths::local_path_for(&cache_dir, url),
            None => paths::default_path(&cache_dir),
        }
    }

    /// Make sure the asset is cached locally and build its record.
    ///
    /// An absent descriptor (or one without a URL) yields the placeholder.
    #[instrument(level = "debug", skip_all, fields(table = %identity.table_name, entry = %identity.entry_id))]
    pub async fn materialize(
        &self,
        descriptor: Option<&FileDescriptor>,
        identity: &IdentityContext,
    ) -> Result<AssetRecord> {
        let resolved = match descriptor.and_then(|d| d.remote_path().map(|url| (d, url))) {
            Some((descriptor, url)) => self.resolve_remote(descriptor, url).await?,
            None => self.resolve_default().await?,
        };

        let content_digest = file_digest(&resolved.local_path).await?;

        Ok(AssetRecord {
            id: self.ids.create(&identity.entry_id, &identity.column.id),
            parent: identity.parent_id.clone(),
            children: Vec::new(),
            absolute_path: resolved.local_path,
            internal: Internal {
                node_type: self.ids.create(&identity.table_name, &identity.column.id),
                media_type: paths::media_type(&resolved.extension),
                content: resolved.content,
                content_digest,
            },
            extension: resolved.extension,
            name: resolved.name,
            title: resolved.title,
            caption: resolved.caption,
        })
    }

    async fn resolve_remote(&self, descriptor: &FileDescriptor, url: &str) -> Result<Resolved> {
        let remote = paths::remote_url(self.context.site_url(), url);
        let local_path = paths::local_path_for(&self.context.directus_cache_dir(), url);

        self.ensure_cached(&remote, &local_path).await?;

        let url_file = url.rsplit('/').next().unwrap_or(url);
        let file_name = descriptor
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(url_file);
        let mut extension = paths::extension_of(file_name);
        if extension.is_empty() {
            extension = paths::extension_of(url_file);
        }

        Ok(Resolved {
            local_path,
            content: remote,
            name: paths::display_name(file_name).to_string(),
            extension,
            title: descriptor.title.clone(),
            caption: descriptor.caption.clone(),
        })
    }

    async fn resolve_default(&self) -> Result<Resolved> {
        let local_path = paths::default_path(&self.context.directus_cache_dir());

        let path = local_path.as_path();
        self.default_copied
            .get_or_try_init(|| async move {
                ensure_parent(path).await?;
                fs::write(path, DEFAULT_IMAGE)
                    .await
                    .map_err(|e| AssetError::filesystem(path, e))?;
                debug!("Copied default image to {}", path.display());
                Ok::<(), AssetError>(())
            })
            .await?;

        Ok(Resolved {
            content: local_path.display().to_string(),
            local_path,
            name: paths::DEFAULT_FILE_NAME.to_string(),
            extension: paths::DEFAULT_EXTENSION.to_string(),
            title: None,
            caption: None,
        })
    }

    /// Fetch `remote` into `local` unless `local` already has content.
    ///
    /// Returns whether a download happened. A non-empty file is trusted as is.
    pub async fn ensure_cached(&self, remote: &str, local: &Path) -> Result<bool> {
        let lease = PathLease::acquire(&self.in_flight, local);
        let _guard = lease.lock.lock().await;
        self.fill(remote, local).await
    }

    async fn fill(&self, remote: &str, local: &Path) -> Result<bool> {
        ensure_file(local).await?;
        let len = fs::metadata(local)
            .await
            .map_err(|e| AssetError::filesystem(local, e))?
            .len();
        if len > 0 {
            debug!("Using cached file {}", local.display());
            return Ok(false);
        }

        self.fetcher.fetch_to(remote, local).await?;
        Ok(true)
    }

    #[cfg(test)]
    fn in_flight_paths(&self) -> usize {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

async fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| AssetError::filesystem(parent, e))?;
    }
    Ok(())
}

/// Create `path` (and its parents) as an empty file if it does not exist
async fn ensure_file(path: &Path) -> Result<()> {
    ensure_parent(path).await?;
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(|e| AssetError::filesystem(path, e))?;
    Ok(())
}
