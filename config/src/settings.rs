//! Build settings management

use crate::BuildContext;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the optional settings file in the program directory
pub const SETTINGS_FILE_NAME: &str = "directus.toml";

/// Overrides `site_url`
pub const SITE_URL_ENV: &str = "DIRECTUS_URL";

/// Overrides `program_directory`
pub const PROGRAM_DIR_ENV: &str = "DIRECTUS_PROGRAM_DIR";

/// Settings stored in directus.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the Directus server (e.g., "https://cms.example")
    pub site_url: Option<String>,
    /// Root of the site being built; caches go under `<program_directory>/.cache`
    pub program_directory: Option<PathBuf>,
}

impl Settings {
    /// Load settings from `<dir>/directus.toml`, or return defaults if not found.
    ///
    /// A file that exists but does not parse is an error.
    pub fn load(dir: &Path) -> Result<Self, String> {
        let path = dir.join(SETTINGS_FILE_NAME);

        let Ok(content) = fs::read_to_string(&path) else {
            return Ok(Self::default());
        };

        toml::from_str(&content)
            .map_err(|e| format!("Malformed settings file {}: {}", path.display(), e))
    }

    /// Apply environment variable overrides on top of file values
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(SITE_URL_ENV) {
            self.site_url = Some(url);
        }
        if let Ok(dir) = std::env::var(PROGRAM_DIR_ENV) {
            self.program_directory = Some(PathBuf::from(dir));
        }
        self
    }

    /// Resolve into a build context.
    ///
    /// Falls back to `fallback_dir` for the program directory. A missing site
    /// URL is an error since no remote file could be located without it.
    pub fn into_context(self, fallback_dir: &Path) -> Result<BuildContext, String> {
        let site_url = self
            .site_url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| format!("No Directus URL configured (set {} or site_url)", SITE_URL_ENV))?;
        let program_directory = self
            .program_directory
            .unwrap_or_else(|| fallback_dir.to_path_buf());
        Ok(BuildContext::new(program_directory, site_url))
    }
}
