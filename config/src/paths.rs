use std::path::{Path, PathBuf};

/// Directory under the program directory that holds build caches.
pub const CACHE_DIR_NAME: &str = ".cache";

/// Subdirectory of the cache root owned by Directus assets.
pub const DIRECTUS_DIR_NAME: &str = "directus";

/// Process-wide build context: where the site lives and where the CMS is.
///
/// Resolved once at startup and treated as read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    program_directory: PathBuf,
    site_url: String,
}

impl BuildContext {
    pub fn new(program_directory: impl Into<PathBuf>, site_url: impl Into<String>) -> Self {
        Self {
            program_directory: program_directory.into(),
            site_url: site_url.into(),
        }
    }

    pub fn program_directory(&self) -> &Path {
        &self.program_directory
    }

    /// Base URL of the Directus server, as configured
    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    /// `<program>/.cache`
    pub fn cache_root(&self) -> PathBuf {
        self.program_directory.join(CACHE_DIR_NAME)
    }

    /// `<program>/.cache/directus`
    pub fn directus_cache_dir(&self) -> PathBuf {
        self.cache_root().join(DIRECTUS_DIR_NAME)
    }

    /// Default log file location inside the cache root
    pub fn log_file_path(&self) -> PathBuf {
        self.cache_root().join("directus-image.log")
    }
}
