use std::path::PathBuf;

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while materializing an asset
#[derive(Debug, Error)]
pub enum AssetError {
    /// The remote fetch failed at the connection or stream level
    #[error("Failed to fetch {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: BoxError,
    },

    /// Creating, writing, or reading a cache file failed
    #[error("Filesystem error at {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AssetError {
    pub fn network(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        AssetError::Network {
            url: url.into(),
            source: source.into(),
        }
    }

    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AssetError::Filesystem {
            path: path.into(),
            source,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, AssetError::Network { .. })
    }
}

pub type Result<T> = std::result::Result<T, AssetError>;
