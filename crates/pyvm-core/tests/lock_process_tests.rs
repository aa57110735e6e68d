//! Process-level locking tests
//!
//! Thread-level behaviour is covered in `src/lock/tests.rs`; these spawn
//! real processes to check the advisory locks hold across process
//! boundaries.

use pyvm_core::{Config, StateStore};
use pyvm_testkit::example_bin;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

#[test]
fn test_install_lock_serializes_processes() {
    let temp = TempDir::new().unwrap();
    let config = Config::new(temp.path());
    config.ensure_layout().unwrap();

    const NUM_PROCESSES: usize = 3;

    let handles: Vec<_> = (0..NUM_PROCESSES)
        .map(|id| {
            let root = temp.path().to_path_buf();
            std::thread::spawn(move || {
                let status = Command::new(example_bin("lock_holder"))
                    .arg(&root)
                    .arg("3.12.1")
                    .arg(id.to_string())
                    .status()
                    .expect("Failed to execute lock_holder");
                assert!(status.success(), "lock_holder should exit successfully");
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // Each start must be immediately followed by the same process's end
    let content = fs::read_to_string(config.cache_dir().join("marker.txt")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), NUM_PROCESSES * 2);
    for pair in lines.chunks(2) {
        let start = pair[0].strip_suffix(" start").unwrap();
        let end = pair[1].strip_suffix(" end").unwrap();
        assert_eq!(start, end, "critical sections interleaved:\n{}", content);
    }
}

#[test]
fn test_concurrent_state_writers_never_corrupt_document() {
    let temp = TempDir::new().unwrap();
    let config = Config::new(temp.path());
    config.ensure_layout().unwrap();

    let versions = ["3.8.18", "3.9.18", "3.10.13", "3.11.7", "3.12.1"];

    let handles: Vec<_> = versions
        .iter()
        .map(|version| {
            let root = temp.path().to_path_buf();
            let version = version.to_string();
            std::thread::spawn(move || {
                let status = Command::new(example_bin("state_writer"))
                    .arg(&root)
                    .arg(&version)
                    .arg("20")
                    .status()
                    .expect("Failed to execute state_writer");
                assert!(status.success(), "state_writer should exit successfully");
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let state = StateStore::new(&config).read().unwrap();
    let selected = state.global_version().unwrap();
    assert!(versions.contains(&selected), "unexpected version {}", selected);

    // No stray temp files left next to state.json
    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
