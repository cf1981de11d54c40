//! Filesystem utilities for the degraded fallback paths.

use std::path::Path;
use tokio::fs;

use crate::error::{MediaError, MediaResult};

/// Copy a file verbatim from `src` to `dst`.
///
/// The copy goes to a temporary sibling of `dst` first and is renamed
/// into place, so a failed copy never leaves a partial file visible at
/// the destination. Parent directories are created as needed.
pub async fn copy_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> MediaResult<()> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    if !src.exists() {
        return Err(MediaError::FileNotFound(src.to_path_buf()));
    }

    if let Some(parent) = dst.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let tmp_dst = dst.with_extension("tmp");

    fs::copy(src, &tmp_dst).await.map_err(|e| {
        tracing::error!(
            "Failed to copy file: {} -> {}: {}",
            src.display(),
            tmp_dst.display(),
            e
        );
        MediaError::from(e)
    })?;

    fs::rename(&tmp_dst, dst).await.map_err(|e| {
        let _ = std::fs::remove_file(&tmp_dst);
        tracing::error!(
            "Failed to rename temp file: {} -> {}: {}",
            tmp_dst.display(),
            dst.display(),
            e
        );
        MediaError::from(e)
    })?;

    tracing::debug!("Copied {} -> {}", src.display(), dst.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_copy_preserves_bytes() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("source.bin");
        let dst = dir.path().join("dest.bin");

        fs::write(&src, b"verbatim payload").await.unwrap();

        copy_file(&src, &dst).await.unwrap();

        assert!(src.exists(), "Source must be left untouched");
        assert_eq!(fs::read(&dst).await.unwrap(), b"verbatim payload");
    }

    #[tokio::test]
    async fn test_copy_to_subdirectory() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("source.bin");
        let dst = dir.path().join("subdir").join("dest.bin");

        fs::write(&src, b"content").await.unwrap();

        copy_file(&src, &dst).await.unwrap();
        assert!(dst.exists());
    }

    #[tokio::test]
    async fn test_copy_missing_source() {
        let dir = TempDir::new().unwrap();
        let err = copy_file(dir.path().join("absent.bin"), dir.path().join("dest.bin"))
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }
}
