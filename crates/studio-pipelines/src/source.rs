//! Media source resolution.
//!
//! Pipelines only ever operate on local files. A local source must
//! exist; a remote source is downloaded and materialized under the
//! store's `inputs/` directory with a UUID-derived name before any
//! processing starts.

use std::path::PathBuf;

use reqwest::Client;
use tracing::{info, warn};

use studio_models::MediaSource;
use studio_storage::{unique_file_name, LocalStore};

use crate::error::{PipelineError, PipelineResult};

/// Directory (under the store root) remote sources are materialized to.
const INPUTS_DIR: &str = "inputs";

/// Resolve a media source to a readable local path.
pub(crate) async fn resolve_source(
    http: &Client,
    store: &LocalStore,
    source: &MediaSource,
) -> PipelineResult<PathBuf> {
    match source {
        MediaSource::Local(path) => {
            if path.exists() {
                Ok(path.clone())
            } else {
                Err(PipelineError::NotFound(path.clone()))
            }
        }
        MediaSource::Remote(url) => {
            let bytes = fetch_remote_bytes(http, url).await?;
            let key = format!(
                "{INPUTS_DIR}/{}",
                unique_file_name("input", source.extension().as_deref())
            );
            let path = store.put(&key, &bytes).await?;
            info!(
                "Materialized remote source {} ({} bytes) at {}",
                url,
                bytes.len(),
                path.display()
            );
            Ok(path)
        }
    }
}

/// Download remote bytes, trying the shared client first and a freshly
/// built client second. Both failing is a fatal `FetchFailed`.
async fn fetch_remote_bytes(http: &Client, url: &str) -> PipelineResult<Vec<u8>> {
    match try_fetch(http, url).await {
        Ok(bytes) => Ok(bytes),
        Err(primary_err) => {
            warn!(
                "Primary fetch of {} failed ({}), retrying with a fresh client",
                url, primary_err
            );
            let fallback = Client::new();
            try_fetch(&fallback, url)
                .await
                .map_err(|e| PipelineError::fetch_failed(format!("{url}: {e}")))
        }
    }
}

async fn try_fetch(client: &Client, url: &str) -> Result<Vec<u8>, reqwest::Error> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_storage::StoreConfig;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store_in(dir: &TempDir) -> LocalStore {
        LocalStore::new(StoreConfig {
            root: dir.path().to_path_buf(),
            public_base_url: "http://localhost:8000/storage".to_string(),
        })
    }

    #[tokio::test]
    async fn test_local_source_must_exist() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let source = MediaSource::parse("/nonexistent/input.png");

        let err = resolve_source(&Client::new(), &store, &source)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_existing_local_source_passes_through() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let file = dir.path().join("input.png");
        tokio::fs::write(&file, b"bytes").await.unwrap();

        let source = MediaSource::Local(file.clone());
        let resolved = resolve_source(&Client::new(), &store, &source)
            .await
            .unwrap();
        assert_eq!(resolved, file);
    }

    #[tokio::test]
    async fn test_remote_source_is_materialized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/media/photo.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fixed png bytes".to_vec()))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let source = MediaSource::parse(&format!("{}/media/photo.png", server.uri()));

        let resolved = resolve_source(&Client::new(), &store, &source)
            .await
            .unwrap();

        assert!(resolved.starts_with(dir.path().join("inputs")));
        assert!(resolved
            .file_name()
            .unwrap()
            .to_string_lossy()
            .ends_with(".png"));
        assert_eq!(tokio::fs::read(&resolved).await.unwrap(), b"fixed png bytes");
    }

    #[tokio::test]
    async fn test_missing_remote_is_fetch_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/media/gone.png"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let source = MediaSource::parse(&format!("{}/media/gone.png", server.uri()));

        let err = resolve_source(&Client::new(), &store, &source)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::FetchFailed(_)));

        // Nothing may be materialized for a failed fetch
        assert!(!dir.path().join("inputs").exists());
    }
}
