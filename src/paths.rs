//! Deterministic mapping from remote file URLs to cache paths and names.
//!
//! Everything here is pure: the same input always yields the same output,
//! which is what makes the on-disk cache addressable by URL.

use std::path::{Component, Path, PathBuf};

/// File name of the placeholder used when a column has no file
pub const DEFAULT_FILE_NAME: &str = "__default.png";

/// Extension of the placeholder
pub const DEFAULT_EXTENSION: &str = "png";

/// Split a file name into (stem, extension) on the last dot.
///
/// A leading dot (".hidden") does not start an extension.
fn split_extension(name: &str) -> Option<(&str, &str)> {
    match name.rfind('.') {
        Some(pos) if pos > 0 => Some((&name[..pos], &name[pos + 1..])),
        _ => None,
    }
}

/// Lower-case the trailing extension of the last path segment of `url`.
pub fn lowercase_extension(url: &str) -> String {
    let segment_start = url.rfind('/').map(|p| p + 1).unwrap_or(0);
    let (dir, file) = url.split_at(segment_start);
    match split_extension(file) {
        Some((stem, ext)) => format!("{}{}.{}", dir, stem, ext.to_lowercase()),
        None => url.to_string(),
    }
}

/// Local cache path for a server-relative URL.
///
/// Only normal components are kept, so a URL cannot point outside `cache_dir`.
pub fn local_path_for(cache_dir: &Path, url: &str) -> PathBuf {
    let lowered = lowercase_extension(url);
    let mut path = cache_dir.to_path_buf();
    for component in Path::new(&lowered).components() {
        if let Component::Normal(part) = component {
            path.push(part);
        }
    }
    path
}

/// Cache path of the placeholder image
pub fn default_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join(DEFAULT_FILE_NAME)
}

/// Display name with the trailing extension stripped ("Cover.png" -> "Cover").
///
/// Only the last extension goes: "my.photo.jpg" -> "my.photo", not "my".
pub fn display_name(name: &str) -> &str {
    split_extension(name).map(|(stem, _)| stem).unwrap_or(name)
}

/// Trailing extension, lower-cased; empty when there is none
pub fn extension_of(name: &str) -> String {
    split_extension(name)
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// Absolute URL of a server-relative path on the CMS
pub fn remote_url(site_url: &str, url: &str) -> String {
    if site_url.ends_with('/') && url.starts_with('/') {
        format!("{}{}", site_url, &url[1..])
    } else {
        format!("{}{}", site_url, url)
    }
}

/// MIME type reported for an image extension
pub fn media_type(extension: &str) -> String {
    format!("image/{}", extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_extension() {
        assert_eq!(lowercase_extension("/uploads/Photo.JPG"), "/uploads/Photo.jpg");
        assert_eq!(lowercase_extension("/uploads/img.png"), "/uploads/img.png");
        assert_eq!(lowercase_extension("/v1.2/archive.tar.GZ"), "/v1.2/archive.tar.gz");
        assert_eq!(lowercase_extension("/v1.2/README"), "/v1.2/README");
        assert_eq!(lowercase_extension("/uploads/.Hidden"), "/uploads/.Hidden");
    }

    #[test]
    fn test_local_path_is_idempotent() {
        let dir = Path::new("/tmp/build/.cache/directus");
        let first = local_path_for(dir, "/uploads/Photo.JPG");
        let second = local_path_for(dir, "/uploads/Photo.JPG");
        assert_eq!(first, second);
        assert_eq!(first, PathBuf::from("/tmp/build/.cache/directus/uploads/Photo.jpg"));
    }

    #[test]
    fn test_local_path_stays_inside_cache() {
        let dir = Path::new("/tmp/build/.cache/directus");
        let path = local_path_for(dir, "/../../etc/passwd");
        assert!(path.starts_with(dir));
        assert_eq!(path, PathBuf::from("/tmp/build/.cache/directus/etc/passwd"));
    }

    #[test]
    fn test_names() {
        assert_eq!(display_name("Cover.png"), "Cover");
        assert_eq!(display_name("my.photo.JPG"), "my.photo");
        assert_eq!(display_name("noext"), "noext");
        assert_eq!(extension_of("Photo.JPG"), "jpg");
        assert_eq!(extension_of("noext"), "");
        assert_eq!(media_type("jpg"), "image/jpg");
    }

    #[test]
    fn test_remote_url() {
        assert_eq!(
            remote_url("https://cms.example", "/uploads/img.png"),
            "https://cms.example/uploads/img.png"
        );
        assert_eq!(
            remote_url("https://cms.example/", "/uploads/img.png"),
            "https://cms.example/uploads/img.png"
        );
    }
}
