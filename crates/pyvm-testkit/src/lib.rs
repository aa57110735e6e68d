//! Test utilities for pyvm
//!
//! This crate provides shared testing utilities used across the pyvm workspace.

pub mod env;
pub mod fixtures;
pub mod mock;

pub use env::{with_env_vars, with_isolated_root};
pub use fixtures::{
    failing_source_archive_bytes, source_archive_bytes, write_fake_make, write_fake_python,
};
pub use mock::{mock_source_archive, mock_source_archive_status};

use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary directory within `.tmp/` at the project root
///
/// This keeps test files in one gitignored location. The directory is
/// removed when the returned `TempDir` is dropped.
///
/// # Panics
///
/// Panics if the current directory cannot be determined or `.tmp/` cannot
/// be created.
pub fn temp_dir_in_workspace() -> TempDir {
    let workspace_root = std::env::current_dir().expect("Failed to get current directory");

    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base).expect("Failed to create .tmp directory");

    TempDir::new_in(&tmp_base).expect("Failed to create temporary directory in .tmp/")
}

/// Get the path to a compiled example binary
///
/// Example binaries are built by `cargo test` into `target/<profile>/examples/`.
///
/// # Examples
///
/// ```no_run
/// use pyvm_testkit::example_bin;
/// use std::process::Command;
///
/// fn test_with_example() {
///     let status = Command::new(example_bin("lock_holder"))
///         .args(["/tmp/root", "3.12.1", "0"])
///         .status()
///         .unwrap();
///     assert!(status.success());
/// }
/// ```
pub fn example_bin(name: &str) -> PathBuf {
    let mut path = std::env::current_exe().expect("Failed to get current executable path");

    // target/debug/deps/test_binary -> target/debug/examples/
    path.pop();
    path.pop();
    path.push("examples");
    path.push(name);

    if cfg!(target_os = "windows") {
        path.set_extension("exe");
    }

    path
}
