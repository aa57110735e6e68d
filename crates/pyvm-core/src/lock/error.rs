//! Error types for file locking

use std::path::PathBuf;
use thiserror::Error;

/// Error type for lock operations
#[derive(Debug, Error)]
pub enum LockError {
    /// Another process kept the lock for longer than the allowed wait
    #[error("LOCK_TIMEOUT: timed out waiting for lock on {} ({description})", .path.display())]
    Timeout { path: PathBuf, description: String },

    #[error("LOCK_IO: {operation} failed for {}: {source}", .path.display())]
    Io {
        #[source]
        source: std::io::Error,
        path: PathBuf,
        operation: String,
    },
}
