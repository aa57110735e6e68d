//! Installed runtimes, derived from `<root>/runtimes/py-<version>` directories
//!
//! Nothing is recorded separately: a version is installed exactly when its
//! runtime directory exists.

use crate::config::{Config, consts};
use crate::error::{PyvmError, Result};
use crate::version::RuntimeVersion;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct RuntimeRegistry {
    runtimes_dir: PathBuf,
}

impl RuntimeRegistry {
    pub fn new(config: &Config) -> Self {
        Self {
            runtimes_dir: config.runtimes_dir(),
        }
    }

    /// Installed versions in ascending numeric order
    ///
    /// Fails with [`PyvmError::RuntimesDirMissing`] when the runtimes
    /// directory does not exist, so callers can tell "not initialized" apart
    /// from "nothing installed".
    pub fn list_installed_versions(&self) -> Result<Vec<RuntimeVersion>> {
        if !self.runtimes_dir.is_dir() {
            return Err(PyvmError::RuntimesDirMissing {
                path: self.runtimes_dir.clone(),
            });
        }

        let entries = std::fs::read_dir(&self.runtimes_dir)
            .map_err(|e| PyvmError::io("read directory", &self.runtimes_dir, e))?;

        let mut versions = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| PyvmError::io("read directory", &self.runtimes_dir, e))?;
            if !entry.path().is_dir() {
                continue;
            }
            let name = entry.file_name();
            let Some(suffix) = name
                .to_str()
                .and_then(|n| n.strip_prefix(consts::RUNTIME_DIR_PREFIX))
            else {
                continue;
            };
            match RuntimeVersion::parse(suffix) {
                Ok(version) => versions.push(version),
                Err(_) => tracing::debug!("skipping unrecognized runtime directory {:?}", name),
            }
        }

        versions.sort();
        Ok(versions)
    }

    pub fn is_installed(&self, version: &RuntimeVersion) -> bool {
        self.runtime_dir(version).is_dir()
    }

    /// `<root>/runtimes/py-<version>`
    pub fn runtime_dir(&self, version: &RuntimeVersion) -> PathBuf {
        self.runtimes_dir
            .join(format!("{}{}", consts::RUNTIME_DIR_PREFIX, version))
    }

    /// Interpreter inside an installed runtime
    ///
    /// `make altinstall` only creates the minor-versioned name
    /// (`bin/python3.12`), never a bare `python`.
    pub fn executable(&self, version: &RuntimeVersion) -> PathBuf {
        self.runtime_dir(version)
            .join("bin")
            .join(format!("python{}", version.major_minor()))
    }

    /// Removes the runtime directory of `version` and nothing else
    pub fn uninstall(&self, version: &RuntimeVersion) -> Result<PathBuf> {
        let dir = self.runtime_dir(version);
        if !dir.is_dir() {
            return Err(PyvmError::VersionNotInstalled {
                version: version.to_string(),
            });
        }

        std::fs::remove_dir_all(&dir).map_err(|e| PyvmError::io("remove directory", &dir, e))?;
        tracing::debug!("removed {}", dir.display());
        Ok(dir)
    }
}
