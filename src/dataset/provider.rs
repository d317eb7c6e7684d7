//! Dataset download

use super::{DatasetError, DatasetResult};
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Download `url` to `path` unless the file already exists.
///
/// The body is written to a `.part` sibling first and renamed into place, so
/// an interrupted download never leaves a truncated dataset behind.
pub async fn ensure_dataset(path: &Path, url: &str, timeout: Duration) -> DatasetResult<()> {
    let io_err = |source: std::io::Error| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    };

    if tokio::fs::try_exists(path).await.map_err(io_err)? {
        info!(path = %path.display(), "Dataset already downloaded");
        return Ok(());
    }

    let download_err = |e: reqwest::Error| DatasetError::Download {
        url: url.to_string(),
        reason: e.to_string(),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }

    info!(url, path = %path.display(), "Downloading dataset");
    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(download_err)?;
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(download_err)?;
    let body = response.bytes().await.map_err(download_err)?;

    write_atomically(path, &body).await.map_err(io_err)?;

    info!(bytes = body.len(), "Download complete");
    Ok(())
}

/// Write `body` to `<path>.part`, then rename it over `path`. The partial file
/// is removed if either step fails.
async fn write_atomically(path: &Path, body: &[u8]) -> std::io::Result<()> {
    let mut partial = path.as_os_str().to_owned();
    partial.push(".part");
    let partial = PathBuf::from(partial);

    let result = match tokio::fs::write(&partial, body).await {
        Ok(()) => tokio::fs::rename(&partial, path).await,
        Err(e) => Err(e),
    };
    if result.is_err() {
        if let Err(e) = tokio::fs::remove_file(&partial).await {
            debug!(path = %partial.display(), error = %e, "No partial download to remove");
        }
    }
    result
}
