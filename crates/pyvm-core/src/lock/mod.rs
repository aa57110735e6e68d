//! Advisory file locks for process-level mutual exclusion
//!
//! Installs of the same version and writes to state.json can race when two
//! `pyvm` invocations run at once. These helpers wrap `fs2` locks with
//! retry, backoff and a timeout.

use std::path::Path;
use std::time::Duration;

mod acquire;
mod error;
mod guard;

pub use error::LockError;
pub use guard::LockGuard;


/// Acquires an exclusive lock on the specified path with a timeout.
///
/// The lock file (and its parent directories) are created if missing. While
/// another process holds the lock, acquisition is retried with exponential
/// backoff until `timeout` elapses. `description` is used in the waiting
/// notice and in the timeout error.
///
/// # Examples
///
/// ```no_run
/// use pyvm_core::lock::acquire_lock;
/// use std::time::Duration;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let lock_path = Path::new("/tmp/py-3.12.1.lock");
/// let guard = acquire_lock(lock_path, Duration::from_secs(30), "install Python 3.12.1")?;
/// // Critical section here
/// drop(guard);
/// # Ok(())
/// # }
/// ```
pub fn acquire_lock(
    lock_path: &Path,
    timeout: Duration,
    description: &str,
) -> Result<LockGuard, LockError> {
    acquire::acquire_with_retry(lock_path, timeout, description, acquire::LockKind::Exclusive)
}

/// Acquires a shared lock on the specified path with a timeout.
///
/// Shared locks coexist with each other but conflict with exclusive locks,
/// so a reader never observes a half-written state file.
pub fn acquire_shared_lock(
    lock_path: &Path,
    timeout: Duration,
    description: &str,
) -> Result<LockGuard, LockError> {
    acquire::acquire_with_retry(lock_path, timeout, description, acquire::LockKind::Shared)
}
