//! Version resolution
//!
//! Precedence, highest first:
//!
//! 1. the nearest `.python-version` file from the working directory upward
//! 2. the global version in state.json
//! 3. the system interpreter found on PATH with the shim directory removed
//!
//! Resolution never fails. A selected version may name a runtime that is not
//! installed; the registry, not the resolver, decides that.

use crate::exec::{CommandRunner, ExecOptions, OutputMode};
use crate::info::{SelectedVersion, VersionSource};
use crate::shim;
use pyvm_core::config::consts;
use pyvm_core::{Config, PersistedState, path};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub struct Resolver<'a, R: CommandRunner + ?Sized> {
    config: &'a Config,
    runner: &'a R,
}

impl<'a, R: CommandRunner + ?Sized> Resolver<'a, R> {
    pub fn new(config: &'a Config, runner: &'a R) -> Self {
        Self { config, runner }
    }

    /// Computes the effective version for `cwd`
    pub fn resolve(&self, state: &PersistedState, cwd: &Path) -> SelectedVersion {
        if let Some((file, version)) = find_override_file(cwd) {
            tracing::debug!("using {} from {}", version, file.display());
            return SelectedVersion {
                version,
                source: VersionSource::OverrideFile(file),
            };
        }

        if let Some(version) = state.global_version() {
            tracing::debug!("using global version {}", version);
            return SelectedVersion {
                version: version.to_string(),
                source: VersionSource::PersistedState(self.config.state_path()),
            };
        }

        SelectedVersion {
            version: self.probe_system_version(cwd),
            source: VersionSource::System,
        }
    }

    /// First system interpreter on PATH, ignoring the shim directory
    ///
    /// Directories are compared after resolving symlinks and relative
    /// spellings. A candidate that is itself a pyvm shim is skipped wherever
    /// it lives, since running it would call back into `pyvm which`.
    pub fn system_executable(&self, cwd: &Path) -> Option<PathBuf> {
        let shims_dir = resolve_dir(&self.config.shims_dir(), cwd);
        let search_path = self.path_without(&shims_dir, cwd)?;

        consts::probe::CANDIDATES.iter().find_map(|name| {
            which::which_in_all(name, Some(&search_path), cwd)
                .ok()?
                .find(|candidate| {
                    let in_shims_dir = candidate
                        .parent()
                        .is_some_and(|dir| resolve_dir(dir, cwd) == shims_dir);
                    if in_shims_dir || shim::is_shim(candidate) {
                        tracing::debug!("skipping shim {}", candidate.display());
                        return false;
                    }
                    true
                })
        })
    }

    /// Version reported by the system interpreter, or an empty string
    ///
    /// A missing or misbehaving interpreter is logged, not surfaced, so that
    /// `pyvm version` keeps working on machines without a system Python.
    pub fn probe_system_version(&self, cwd: &Path) -> String {
        let Some(executable) = self.system_executable(cwd) else {
            tracing::warn!("no system Python found on PATH");
            return String::new();
        };

        let options = ExecOptions::new(&executable, cwd)
            .arg(consts::probe::VERSION_FLAG)
            .output(OutputMode::Capture);

        match self.runner.run_checked(&options) {
            Ok(result) => {
                // Python 2 reported its version on stderr
                let output = if result.stdout.trim().is_empty() {
                    &result.stderr
                } else {
                    &result.stdout
                };
                parse_version_output(output)
            }
            Err(e) => {
                tracing::warn!("could not probe {}: {}", executable.display(), e);
                String::new()
            }
        }
    }

    fn path_without(&self, shims_dir: &Path, cwd: &Path) -> Option<OsString> {
        let path_env = self.config.path_env.as_ref()?;
        let kept: Vec<PathBuf> = std::env::split_paths(path_env)
            .filter(|dir| resolve_dir(dir, cwd) != shims_dir)
            .collect();
        std::env::join_paths(kept).ok()
    }
}

/// Canonical form of a PATH entry, or its absolute spelling if it does not
/// exist
fn resolve_dir(dir: &Path, cwd: &Path) -> PathBuf {
    let joined = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        cwd.join(dir)
    };
    std::fs::canonicalize(&joined)
        .or_else(|_| std::path::absolute(&joined))
        .unwrap_or(joined)
}

/// Nearest override file at or above `cwd`, with its trimmed content
///
/// A file whose content is empty after trimming is treated as absent and
/// the search continues upward.
pub fn find_override_file(cwd: &Path) -> Option<(PathBuf, String)> {
    let start = std::path::absolute(cwd).unwrap_or_else(|_| cwd.to_path_buf());

    path::find_upwards(&start, |dir| {
        let candidate = dir.join(consts::OVERRIDE_FILE_NAME);
        if !candidate.is_file() {
            return None;
        }
        match std::fs::read_to_string(&candidate) {
            Ok(content) if content.trim().is_empty() => {
                tracing::debug!("ignoring empty {}", candidate.display());
                None
            }
            Ok(content) => Some((candidate, content.trim().to_string())),
            Err(e) => {
                tracing::warn!("could not read {}: {}", candidate.display(), e);
                None
            }
        }
    })
}

/// `"Python 3.12.1\n"` -> `"3.12.1"`
fn parse_version_output(output: &str) -> String {
    let trimmed = output.trim();
    trimmed
        .strip_prefix(consts::probe::PRODUCT_PREFIX)
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}
