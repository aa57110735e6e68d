//! Source archive URL construction

use pyvm_core::{Config, PyvmError, Result, RuntimeVersion};
use url::Url;

/// `<base>/<version>/Python-<version>.tgz`
///
/// Segments are appended to whatever path the base URL already has, so
/// mirrors under a sub-path work.
pub fn source_archive_url(base: &str, version: &RuntimeVersion) -> Result<Url> {
    let invalid = |reason: String| PyvmError::NetworkFetchFailed {
        url: base.to_string(),
        reason,
    };

    let mut url = Url::parse(base).map_err(|e| invalid(format!("invalid source URL: {}", e)))?;
    url.path_segments_mut()
        .map_err(|_| invalid("source URL cannot be a base".to_string()))?
        .pop_if_empty()
        .extend([version.as_str(), Config::archive_name(version).as_str()]);

    Ok(url)
}
