//! Environment isolation utilities for testing
//!
//! Environment variables are process-global, so every helper here holds
//! [`ENV_LOCK`] while the environment is modified and restores the previous
//! values before returning.

use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// Static mutex to serialize tests that modify environment variables
pub(crate) static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Run `f` with the given variables set (`Some`) or removed (`None`)
///
/// # Examples
///
/// ```no_run
/// use pyvm_testkit::with_env_vars;
/// use std::ffi::OsStr;
///
/// with_env_vars(&[("PYVM_ROOT", Some(OsStr::new("/tmp/pyvm")))], || {
///     assert_eq!(std::env::var("PYVM_ROOT").unwrap(), "/tmp/pyvm");
/// });
/// ```
pub fn with_env_vars<F, R>(vars: &[(&str, Option<&OsStr>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let originals: Vec<(String, Option<OsString>)> = vars
        .iter()
        .map(|(key, _)| (key.to_string(), std::env::var_os(key)))
        .collect();

    // SAFETY: ENV_LOCK is held, so no other helper mutates the environment concurrently.
    unsafe {
        for (key, value) in vars {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

    // SAFETY: ENV_LOCK is still held.
    unsafe {
        for (key, value) in originals {
            match value {
                Some(value) => std::env::set_var(&key, value),
                None => std::env::remove_var(&key),
            }
        }
    }

    match result {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// Run `f` with `PYVM_ROOT` pointing at a fresh temporary root
///
/// `HOME` is redirected as well, so nothing can fall back to the real
/// `~/.pyvm`, and `PYVM_SOURCE_URL` is cleared.
pub fn with_isolated_root<F, R>(f: F) -> R
where
    F: FnOnce(&Path) -> R,
{
    let fake_home = TempDir::new().expect("Failed to create fake HOME");
    let root = fake_home.path().join(".pyvm-test");

    with_env_vars(
        &[
            ("HOME", Some(fake_home.path().as_os_str())),
            ("PYVM_ROOT", Some(root.as_os_str())),
            ("PYVM_SOURCE_URL", None),
        ],
        || f(&root),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_env_vars_sets_and_restores() {
        let key = "PYVM_TESTKIT_PROBE";
        assert!(std::env::var_os(key).is_none());

        with_env_vars(&[(key, Some(OsStr::new("inner")))], || {
            assert_eq!(std::env::var(key).unwrap(), "inner");
        });

        assert!(std::env::var_os(key).is_none());
    }

    #[test]
    fn test_with_env_vars_restores_after_panic() {
        let key = "PYVM_TESTKIT_PANIC_PROBE";
        let result = std::panic::catch_unwind(|| {
            with_env_vars(&[(key, Some(OsStr::new("set")))], || {
                panic!("boom");
            })
        });

        assert!(result.is_err());
        assert!(std::env::var_os(key).is_none());
    }

    #[test]
    fn test_with_isolated_root_points_root_into_fake_home() {
        with_isolated_root(|root| {
            let home = std::env::var_os("HOME").unwrap();
            assert!(root.starts_with(&home));
            assert_eq!(std::env::var_os("PYVM_ROOT").unwrap(), root.as_os_str());
            assert!(std::env::var_os("PYVM_SOURCE_URL").is_none());
        });
    }

    #[test]
    fn test_with_isolated_root_serializes_access() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::thread;

        let inside = Arc::new(AtomicUsize::new(0));
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let inside = Arc::clone(&inside);
                thread::spawn(move || {
                    with_isolated_root(|_root| {
                        let current = inside.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(std::time::Duration::from_millis(10));
                        assert_eq!(current, 0, "Should be the only thread inside");
                        inside.fetch_sub(1, Ordering::SeqCst);
                    });
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
