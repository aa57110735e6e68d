//! Invocation-wide configuration
//!
//! Ambient lookups (home directory, `PYVM_ROOT`, `PATH`, `PYVM_SOURCE_URL`)
//! happen exactly once, in [`Config::from_env`]. Everything downstream
//! receives a `&Config`, which keeps tests independent of the process
//! environment.

pub mod consts;
mod model;

pub use model::{InstallSettings, NetworkSettings, Settings};

use crate::error::{PyvmError, Result};
use crate::version::RuntimeVersion;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Root of all pyvm-managed files
    pub root: PathBuf,
    /// `PATH` as seen at startup, used for the system runtime probe
    pub path_env: Option<OsString>,
    pub settings: Settings,
}

impl Config {
    /// Configuration rooted at `root` with default settings
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            path_env: None,
            settings: Settings::default(),
        }
    }

    /// Collect configuration from the process environment
    ///
    /// Root: `$PYVM_ROOT` when set and non-empty, otherwise `~/.pyvm`, made
    /// absolute against the working directory so the shims path on PATH and
    /// the one computed here agree.
    /// Settings come from `<root>/config.toml` when present; `PYVM_SOURCE_URL`
    /// overrides the upstream URL.
    pub fn from_env() -> Result<Self> {
        let root = match std::env::var_os(consts::ROOT_ENV_VAR) {
            Some(value) if !value.is_empty() => PathBuf::from(value),
            _ => dirs::home_dir()
                .ok_or(PyvmError::HomeNotFound)?
                .join(consts::DEFAULT_ROOT_DIR_NAME),
        };
        let root =
            std::path::absolute(&root).map_err(|e| PyvmError::io("resolve path", &root, e))?;

        let mut settings = Settings::load_or_default(root.join(consts::layout::SETTINGS_FILE))?;
        if let Ok(url) = std::env::var(consts::SOURCE_URL_ENV_VAR)
            && !url.is_empty()
        {
            settings.install.source_url = url;
        }

        Ok(Self {
            root,
            path_env: std::env::var_os("PATH"),
            settings,
        })
    }

    pub fn with_path_env(mut self, path_env: impl Into<OsString>) -> Self {
        self.path_env = Some(path_env.into());
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn state_path(&self) -> PathBuf {
        self.root.join(consts::layout::STATE_FILE)
    }

    pub fn state_lock_path(&self) -> PathBuf {
        self.root.join(consts::layout::STATE_LOCK_FILE)
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.root.join(consts::layout::CACHE_DIR)
    }

    pub fn runtimes_dir(&self) -> PathBuf {
        self.root.join(consts::layout::RUNTIMES_DIR)
    }

    pub fn shims_dir(&self) -> PathBuf {
        self.root.join(consts::layout::SHIMS_DIR)
    }

    /// `<root>/runtimes/py-<version>`
    pub fn runtime_dir(&self, version: &RuntimeVersion) -> PathBuf {
        self.runtimes_dir()
            .join(format!("{}{}", consts::RUNTIME_DIR_PREFIX, version))
    }

    /// `Python-<version>.tgz`
    pub fn archive_name(version: &RuntimeVersion) -> String {
        format!(
            "{}{}{}",
            consts::upstream::ARCHIVE_PREFIX,
            version,
            consts::upstream::ARCHIVE_EXTENSION
        )
    }

    /// Version-keyed cache entry for the source archive
    pub fn archive_path(&self, version: &RuntimeVersion) -> PathBuf {
        self.cache_dir().join(Self::archive_name(version))
    }

    /// Advisory lock serializing installs of one version
    pub fn install_lock_path(&self, version: &RuntimeVersion) -> PathBuf {
        self.cache_dir()
            .join(format!("{}{}.lock", consts::RUNTIME_DIR_PREFIX, version))
    }

    /// Create the root and its standard subdirectories
    pub fn ensure_layout(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)
            .map_err(|e| PyvmError::io("create directory", &self.root, e))?;
        for dir in consts::layout::DIRECTORIES {
            let path = self.root.join(dir);
            std::fs::create_dir_all(&path)
                .map_err(|e| PyvmError::io("create directory", &path, e))?;
        }
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        consts::layout::DIRECTORIES
            .iter()
            .all(|dir| self.root.join(dir).is_dir())
    }
}
