//! Lock acquisition logic with retry and timeout

use super::{LockError, LockGuard};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(10);
const MAX_RETRY_DELAY: Duration = Duration::from_millis(500);
const PROGRESS_MESSAGE_THRESHOLD: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy)]
pub(crate) enum LockKind {
    Exclusive,
    Shared,
}

impl LockKind {
    fn try_lock(self, file: &File) -> std::io::Result<()> {
        match self {
            // std::fs::File has inherent methods with the same names
            LockKind::Exclusive => FileExt::try_lock_exclusive(file),
            LockKind::Shared => FileExt::try_lock_shared(file),
        }
    }
}

/// Attempts to acquire a lock with retry and timeout
pub(crate) fn acquire_with_retry(
    lock_path: &Path,
    timeout: Duration,
    description: &str,
    kind: LockKind,
) -> Result<LockGuard, LockError> {
    if let Some(parent) = lock_path.parent() {
        fs::create_dir_all(parent).map_err(|e| LockError::Io {
            source: e,
            path: lock_path.to_path_buf(),
            operation: "create parent directories".to_string(),
        })?;
    }

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)
        .map_err(|e| LockError::Io {
            source: e,
            path: lock_path.to_path_buf(),
            operation: "open lock file".to_string(),
        })?;

    let start = Instant::now();
    let mut retry_delay = INITIAL_RETRY_DELAY;
    let mut progress_shown = false;

    loop {
        match kind.try_lock(&file) {
            Ok(()) => {
                tracing::debug!("acquired {:?} lock on {}", kind, lock_path.display());
                return Ok(LockGuard {
                    file,
                    path: lock_path.to_path_buf(),
                });
            }
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
                let elapsed = start.elapsed();

                if elapsed >= timeout {
                    return Err(LockError::Timeout {
                        path: lock_path.to_path_buf(),
                        description: description.to_string(),
                    });
                }

                if !progress_shown && elapsed >= PROGRESS_MESSAGE_THRESHOLD {
                    eprintln!(
                        "Waiting for lock on {} ({})...",
                        lock_path.display(),
                        description
                    );
                    progress_shown = true;
                }

                // Never sleep past the deadline
                thread::sleep(retry_delay.min(timeout.saturating_sub(elapsed)));
                retry_delay = (retry_delay * 2).min(MAX_RETRY_DELAY);
            }
            Err(e) => {
                return Err(LockError::Io {
                    source: e,
                    path: lock_path.to_path_buf(),
                    operation: "acquire lock".to_string(),
                });
            }
        }
    }
}
