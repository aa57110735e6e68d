use std::path::PathBuf;
use thiserror::Error;

use crate::lock::LockError;

#[derive(Error, Debug)]
pub enum PyvmError {
    // Validation errors
    #[error("VERSION_INVALID: '{input}' is not a valid version ({reason}). Expected format 'a.b.c'.")]
    InvalidVersion { input: String, reason: String },

    // Registry errors
    #[error("VERSION_NOT_INSTALLED: Python {version} is not installed")]
    VersionNotInstalled { version: String },

    #[error("RUNTIMES_DIR_MISSING: {} does not exist (run `pyvm init` first)", .path.display())]
    RuntimesDirMissing { path: PathBuf },

    // Network errors
    #[error("NETWORK_FETCH_FAILED: {url}: {reason}")]
    NetworkFetchFailed { url: String, reason: String },

    // Build tool errors
    #[error("COMMAND_FAILED: `{command}` exited with status {status} in {}{stderr_tail}", .cwd.display())]
    CommandFailed {
        command: String,
        status: String,
        cwd: PathBuf,
        stderr_tail: String,
    },

    #[error("COMMAND_SPAWN_FAILED: could not start `{command}`: {source}")]
    CommandSpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("EXTRACTION_FAILED: {}: {reason}", .archive.display())]
    ExtractionFailed { archive: PathBuf, reason: String },

    // State errors
    #[error("STATE_READ_ERROR: failed to read state.json: {0}")]
    StateReadError(String),

    #[error("STATE_WRITE_ERROR: failed to write state.json: {0}")]
    StateWriteError(String),

    // Config errors
    #[error("CONFIG_INVALID: {}: {reason}", .path.display())]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("HOME_NOT_FOUND: could not determine home directory (set PYVM_ROOT)")]
    HomeNotFound,

    // Lock errors
    #[error("LOCK_ERROR: {0}")]
    Lock(#[from] LockError),

    // IO errors
    #[error("IO_ERROR: failed to {operation} {}: {source}", .path.display())]
    Io {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PyvmError {
    /// Shorthand for filesystem failures on a known path
    pub fn io(operation: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PyvmError::Io {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Build tool exited unsuccessfully; keeps only the tail of its stderr
    pub fn command_failed(
        command: impl Into<String>,
        status: impl Into<String>,
        cwd: impl Into<PathBuf>,
        stderr: &str,
    ) -> Self {
        PyvmError::CommandFailed {
            command: command.into(),
            status: status.into(),
            cwd: cwd.into(),
            stderr_tail: format_stderr_tail(stderr),
        }
    }
}

/// Last few lines of captured stderr, for build tool failures
fn format_stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.trim_end().lines().collect();
    if lines.is_empty() {
        return String::new();
    }
    let tail = &lines[lines.len().saturating_sub(10)..];
    format!("\n{}", tail.join("\n"))
}

pub type Result<T> = std::result::Result<T, PyvmError>;
