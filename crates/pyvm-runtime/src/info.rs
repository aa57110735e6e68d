use std::fmt;
use std::path::PathBuf;

/// Where a resolved version came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSource {
    /// A `.python-version` file, by absolute path
    OverrideFile(PathBuf),
    /// The global selection in state.json
    PersistedState(PathBuf),
    /// Whatever interpreter is on PATH outside the shims
    System,
}

impl VersionSource {
    pub fn is_system(&self) -> bool {
        matches!(self, VersionSource::System)
    }
}

impl fmt::Display for VersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSource::OverrideFile(path) | VersionSource::PersistedState(path) => {
                write!(f, "{}", path.display())
            }
            VersionSource::System => write!(f, "system"),
        }
    }
}

/// Effective version for one invocation; computed fresh, never persisted
///
/// `version` is the raw string from its source and may name a version that
/// is not installed (or, for the system probe, be empty). Check the
/// registry before executing anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedVersion {
    pub version: String,
    pub source: VersionSource,
}
