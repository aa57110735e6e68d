//! Integration tests for `pyvm use`

#![allow(deprecated)]

mod common;

use assert_cmd::assert::OutputAssertExt;
use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_use_installed_version_writes_state() {
    let env = TestEnv::new();
    env.fake_installed("3.12.1");

    env.pyvm()
        .args(["use", "3.12.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Now using Python 3.12.1"))
        .stdout(predicate::str::contains("Installing").not());

    assert_eq!(env.read_global().as_deref(), Some("3.12.1"));
}

#[test]
fn test_use_replaces_previous_selection() {
    let env = TestEnv::new();
    env.fake_installed("3.11.4");
    env.fake_installed("3.12.1");

    env.pyvm().args(["use", "3.11.4"]).assert().success();
    env.pyvm().args(["use", "3.12.1"]).assert().success();

    assert_eq!(env.read_global().as_deref(), Some("3.12.1"));
}

#[test]
fn test_use_invalid_version_leaves_state_untouched() {
    let env = TestEnv::new();
    env.fake_installed("3.12.1");
    env.write_global("3.12.1");

    env.pyvm()
        .args(["use", "latest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("VERSION_INVALID"));

    assert_eq!(env.read_global().as_deref(), Some("3.12.1"));
}

#[test]
fn test_use_warns_when_override_file_wins() {
    let env = TestEnv::new();
    env.fake_installed("3.12.1");
    env.pin(&env.project, "3.11.4");

    env.pyvm()
        .args(["use", "3.12.1"])
        .assert()
        .success()
        .stderr(predicate::str::contains(".python-version"))
        .stderr(predicate::str::contains("3.11.4"));

    assert_eq!(env.read_global().as_deref(), Some("3.12.1"));
}

#[test]
fn test_use_failed_install_leaves_state_untouched() {
    let env = TestEnv::new();
    env.write_global("3.12.1");
    let (_mock, base_url) = pyvm_testkit::mock_source_archive_status("6.2.0", 404);

    env.pyvm_with_source(&base_url)
        .args(["use", "6.2.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NETWORK_FETCH_FAILED"));

    assert_eq!(env.read_global().as_deref(), Some("3.12.1"));
}

#[cfg(unix)]
#[test]
fn test_use_installs_missing_version_first() {
    let env = TestEnv::new().with_host_path();
    pyvm_testkit::write_fake_make(&env.bin);
    let (mock, base_url) = pyvm_testkit::mock_source_archive(
        "6.1.0",
        pyvm_testkit::source_archive_bytes("6.1.0"),
        1,
    );

    env.pyvm_with_source(&base_url)
        .args(["use", "6.1.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Installing Python 6.1.0"))
        .stdout(predicate::str::contains("Now using Python 6.1.0"));

    mock.assert();
    assert!(env.runtime_dir("6.1.0").join("bin").join("python6.1").is_file());
    assert_eq!(env.read_global().as_deref(), Some("6.1.0"));
}
