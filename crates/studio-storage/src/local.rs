//! Local filesystem store.

use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use crate::error::{StorageError, StorageResult};

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Root directory all keys resolve under.
    pub root: PathBuf,
    /// Public base URL prefixed to keys by `url()`.
    pub public_base_url: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("storage"),
            public_base_url: "http://localhost:8000/storage".to_string(),
        }
    }
}

impl StoreConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            root: std::env::var("STORAGE_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("storage")),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/storage".to_string()),
        }
    }
}

/// Append-only store of pipeline artifacts on the local filesystem.
///
/// Every artifact gets a fresh UUID-embedding name, so concurrent writers
/// never contend on a key and existing files are never rewritten in place.
#[derive(Debug, Clone)]
pub struct LocalStore {
    config: StoreConfig,
}

impl LocalStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(StoreConfig::from_env())
    }

    /// Absolute filesystem path for a key.
    pub fn path(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.config.root.join(key))
    }

    /// Public URL for a key.
    pub fn url(&self, key: &str) -> StorageResult<String> {
        validate_key(key)?;
        let base = self.config.public_base_url.trim_end_matches('/');
        Ok(format!("{base}/{key}"))
    }

    /// Create a directory under the root. Idempotent.
    pub async fn make_directory(&self, dir: &str) -> StorageResult<PathBuf> {
        let path = self.path(dir)?;
        fs::create_dir_all(&path).await?;
        Ok(path)
    }

    /// Persist bytes under a key, creating parent directories as needed.
    ///
    /// The write goes to a temporary sibling first and is renamed into
    /// place, so readers never observe a half-written artifact.
    pub async fn put(&self, key: &str, bytes: &[u8]) -> StorageResult<PathBuf> {
        let path = self.path(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("tmp");
        fs::write(&tmp, bytes).await.map_err(|e| {
            StorageError::write_failed(key, e.to_string())
        })?;
        fs::rename(&tmp, &path).await.map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            StorageError::write_failed(key, e.to_string())
        })?;

        debug!("Stored {} bytes at {}", bytes.len(), path.display());
        Ok(path)
    }
}

/// Generate a unique artifact file name: `{prefix}_{uuid}[.ext]`.
pub fn unique_file_name(prefix: &str, extension: Option<&str>) -> String {
    let id = Uuid::new_v4().simple();
    match extension {
        Some(ext) if !ext.is_empty() => format!("{prefix}_{id}.{ext}"),
        _ => format!("{prefix}_{id}"),
    }
}

/// Reject keys that would escape the store root.
fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::invalid_key("empty key"));
    }
    let path = Path::new(key);
    if path.is_absolute()
        || path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
    {
        return Err(StorageError::invalid_key(key));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> LocalStore {
        LocalStore::new(StoreConfig {
            root: dir.path().to_path_buf(),
            public_base_url: "http://localhost:8000/storage/".to_string(),
        })
    }

    #[tokio::test]
    async fn test_put_and_read_back() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let path = store.put("outputs/test.bin", b"payload").await.unwrap();
        assert!(path.exists());
        assert_eq!(fs::read(&path).await.unwrap(), b"payload");
    }

    #[tokio::test]
    async fn test_put_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.put("outputs/artifact.png", b"png").await.unwrap();
        let tmp = store.path("outputs/artifact.tmp").unwrap();
        assert!(!tmp.exists());
    }

    #[tokio::test]
    async fn test_make_directory_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let first = store.make_directory("nobg").await.unwrap();
        let second = store.make_directory("nobg").await.unwrap();
        assert_eq!(first, second);
        assert!(first.is_dir());
    }

    #[test]
    fn test_url_joins_base() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(
            store.url("clips/c.mp4").unwrap(),
            "http://localhost:8000/storage/clips/c.mp4"
        );
    }

    #[test]
    fn test_traversal_keys_rejected() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.path("../escape.txt").is_err());
        assert!(store.path("/etc/passwd").is_err());
        assert!(store.path("").is_err());
    }

    #[test]
    fn test_unique_file_name() {
        let a = unique_file_name("clip", Some("mp4"));
        let b = unique_file_name("clip", Some("mp4"));
        assert_ne!(a, b);
        assert!(a.starts_with("clip_"));
        assert!(a.ends_with(".mp4"));
        assert!(unique_file_name("input", None).starts_with("input_"));
    }
}
