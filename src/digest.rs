//! Content identity for cached files

use std::path::Path;

use sha2::{Digest, Sha256};
use tokio::fs;
use tokio::io::AsyncReadExt;

use crate::error::{AssetError, Result};

const READ_CHUNK: usize = 64 * 1024;

/// SHA-256 of a byte slice, hex encoded
pub fn bytes_digest(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// SHA-256 of the file at `path`, hex encoded
pub async fn file_digest(path: &Path) -> Result<String> {
    let mut file = fs::File::open(path)
        .await
        .map_err(|e| AssetError::filesystem(path, e))?;

    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; READ_CHUNK];
    loop {
        let n = file
            .read(&mut buf)
            .await
            .map_err(|e| AssetError::filesystem(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[tokio::test]
    async fn test_file_digest_matches_bytes() {
        let path = env::temp_dir().join(format!("digest_test_{}", uuid::Uuid::new_v4()));
        let data = vec![7u8; READ_CHUNK * 2 + 13];
        fs::write(&path, &data).await.unwrap();

        let first = file_digest(&path).await.unwrap();
        let second = file_digest(&path).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first, bytes_digest(&data));
        assert_eq!(first.len(), 64);

        fs::remove_file(&path).await.ok();
    }

    #[tokio::test]
    async fn test_missing_file_is_filesystem_error() {
        let path = env::temp_dir().join(format!("digest_missing_{}", uuid::Uuid::new_v4()));
        let err = file_digest(&path).await.unwrap_err();
        assert!(matches!(err, AssetError::Filesystem { .. }));
    }
}
