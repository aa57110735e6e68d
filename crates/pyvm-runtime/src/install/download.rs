//! Cached source archive download
//!
//! The archive for a version is kept at `<root>/cache/Python-<version>.tgz`
//! across installs. A cached file is reused unless the caller bypasses the
//! cache. Downloads stream into a temp file next to the cache entry and are
//! persisted over it only once complete, so an interrupted fetch never leaves
//! a truncated archive behind.

use pyvm_core::{PyvmError, Result};
use reqwest::blocking::Client;
use std::io::Write;
use std::path::Path;
use url::Url;

/// How the archive ended up in the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// An existing cache entry was reused
    Cached,
    /// The archive was fetched; carries the size in bytes
    Downloaded(u64),
}

/// Ensures `dest` holds the archive at `url`
///
/// # Errors
///
/// Returns [`PyvmError::NetworkFetchFailed`] for request or HTTP status
/// failures and [`PyvmError::Io`] for cache writes.
pub fn fetch_cached(client: &Client, url: &Url, dest: &Path, no_cache: bool) -> Result<FetchOutcome> {
    if !no_cache && dest.is_file() {
        tracing::debug!("cache hit: {}", dest.display());
        return Ok(FetchOutcome::Cached);
    }

    tracing::info!("downloading {}", url);
    let bytes = download_to(client, url, dest)?;
    Ok(FetchOutcome::Downloaded(bytes))
}

fn download_to(client: &Client, url: &Url, dest: &Path) -> Result<u64> {
    let network_error = |reason: String| PyvmError::NetworkFetchFailed {
        url: url.to_string(),
        reason,
    };

    let mut response = client
        .get(url.as_str())
        .send()
        .map_err(|e| network_error(e.without_url().to_string()))?;

    if let Err(err) = response.error_for_status_ref() {
        return Err(network_error(err.without_url().to_string()));
    }

    let parent = dest
        .parent()
        .ok_or_else(|| PyvmError::io("resolve parent of", dest, std::io::ErrorKind::NotFound.into()))?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)
        .map_err(|e| PyvmError::io("create temporary file in", parent, e))?;

    let downloaded = std::io::copy(&mut response, &mut temp_file)
        .map_err(|e| network_error(format!("interrupted while reading body: {}", e)))?;

    if let Some(expected) = response.content_length()
        && downloaded != expected
    {
        return Err(network_error(format!(
            "size mismatch: expected {} bytes, got {}",
            expected, downloaded
        )));
    }

    temp_file
        .flush()
        .and_then(|_| temp_file.as_file().sync_all())
        .map_err(|e| PyvmError::io("sync", temp_file.path(), e))?;

    temp_file
        .persist(dest)
        .map_err(|e| PyvmError::io("persist download to", dest, e.error))?;

    tracing::debug!("saved {} bytes to {}", downloaded, dest.display());
    Ok(downloaded)
}
