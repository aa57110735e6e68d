//! Persisted global version selection (`<root>/state.json`)
//!
//! The document is overwritten wholesale by `pyvm use`. Reads take a shared
//! lock and writes an exclusive one on `<root>/state.lock`; the new content is
//! written to a temp file and persisted over the old one, so readers never
//! see a partial document.

use crate::config::Config;
use crate::error::{PyvmError, Result};
use crate::lock;
use crate::version::RuntimeVersion;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const WRITE_LOCK_TIMEOUT: Duration = Duration::from_secs(30);
const READ_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// state.json schema
///
/// `global_version` is empty when no global selection has been made.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(rename = "globalVersion", default)]
    pub global_version: String,
}

impl PersistedState {
    /// The global version, or `None` when unset
    pub fn global_version(&self) -> Option<&str> {
        let version = self.global_version.trim();
        (!version.is_empty()).then_some(version)
    }
}

#[derive(Debug, Clone)]
pub struct StateStore {
    root: PathBuf,
    path: PathBuf,
    lock_path: PathBuf,
}

impl StateStore {
    pub fn new(config: &Config) -> Self {
        Self {
            root: config.root.clone(),
            path: config.state_path(),
            lock_path: config.state_lock_path(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads state.json
    ///
    /// A missing file is the empty state. An unreadable or malformed file is
    /// an error; use [`StateStore::read_or_default`] to tolerate it.
    pub fn read(&self) -> Result<PersistedState> {
        if !self.path.exists() {
            return Ok(PersistedState::default());
        }

        let _guard = lock::acquire_shared_lock(&self.lock_path, READ_LOCK_TIMEOUT, "state read")?;

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| PyvmError::StateReadError(format!("Failed to read: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| PyvmError::StateReadError(format!("Failed to parse: {}", e)))
    }

    /// Reads state.json, falling back to the empty state on any failure
    ///
    /// Resolution must keep working before `pyvm init` and with a damaged
    /// state file; the failure is logged instead of surfaced.
    pub fn read_or_default(&self) -> PersistedState {
        self.read().unwrap_or_else(|e| {
            tracing::warn!("ignoring unusable state file {}: {}", self.path.display(), e);
            PersistedState::default()
        })
    }

    /// Overwrites state.json with `{"globalVersion": version}`
    ///
    /// The root directory must already exist; it is created by `pyvm init`,
    /// not here.
    pub fn write(&self, version: &RuntimeVersion) -> Result<()> {
        if !self.root.is_dir() {
            return Err(PyvmError::StateWriteError(format!(
                "{} does not exist (run `pyvm init` first)",
                self.root.display()
            )));
        }

        let _lock = lock::acquire_lock(&self.lock_path, WRITE_LOCK_TIMEOUT, "state update")?;

        let state = PersistedState {
            global_version: version.to_string(),
        };
        let content = serde_json::to_string_pretty(&state)
            .map_err(|e| PyvmError::StateWriteError(format!("Failed to serialize: {}", e)))?;

        atomic_write_json(&content, &self.path, &self.root)?;
        tracing::debug!("global version set to {} in {}", version, self.path.display());
        Ok(())
    }
}

/// Write JSON atomically using NamedTempFile + persist
fn atomic_write_json(content: &str, path: &Path, parent: &Path) -> Result<()> {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut temp_file = NamedTempFile::new_in(parent)
        .map_err(|e| PyvmError::StateWriteError(format!("Failed to create temp file: {}", e)))?;

    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| PyvmError::StateWriteError(format!("Failed to write temp file: {}", e)))?;

    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| PyvmError::StateWriteError(format!("Failed to sync temp file: {}", e)))?;

    temp_file
        .persist(path)
        .map_err(|e| PyvmError::StateWriteError(format!("Failed to persist temp file: {}", e)))?;

    #[cfg(unix)]
    {
        let parent_file = std::fs::File::open(parent)
            .map_err(|e| PyvmError::StateWriteError(format!("Failed to open parent dir: {}", e)))?;
        parent_file
            .sync_all()
            .map_err(|e| PyvmError::StateWriteError(format!("Failed to sync parent dir: {}", e)))?;
    }

    Ok(())
}
