use super::consts;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// config.toml schema - optional user settings under the root directory
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default)]
    pub install: InstallSettings,
    #[serde(default)]
    pub network: NetworkSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstallSettings {
    #[serde(default = "default_source_url")]
    pub source_url: String,
    #[serde(default = "default_jobs")]
    pub jobs: u32,
    #[serde(default = "default_configure_options")]
    pub configure_options: Vec<String>,
}

impl Default for InstallSettings {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            jobs: default_jobs(),
            configure_options: default_configure_options(),
        }
    }
}

fn default_source_url() -> String {
    consts::upstream::DEFAULT_SOURCE_URL.to_string()
}

fn default_jobs() -> u32 {
    consts::build::DEFAULT_JOBS
}

fn default_configure_options() -> Vec<String> {
    consts::build::DEFAULT_CONFIGURE_OPTIONS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    consts::network::DEFAULT_TIMEOUT_SECS
}

impl Settings {
    /// Read config.toml; a missing file yields defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(crate::error::PyvmError::io("read", path, e)),
        };

        let settings: Self =
            toml::from_str(&content).map_err(|e| crate::error::PyvmError::ConfigInvalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if settings.install.jobs == 0 {
            return Err(crate::error::PyvmError::ConfigInvalid {
                path: path.to_path_buf(),
                reason: "install.jobs must be at least 1".to_string(),
            });
        }

        Ok(settings)
    }
}
