//! Integration tests for `pyvm which`

#![allow(deprecated)]

mod common;

use assert_cmd::assert::OutputAssertExt;
use common::TestEnv;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_which_prints_global_runtime_executable() {
    let env = TestEnv::new();
    let exe = env.fake_installed("3.12.1");
    env.write_global("3.12.1");

    env.pyvm()
        .args(["which", "--raw"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", exe.display())));
}

#[test]
fn test_which_prefers_nearest_override_file() {
    let env = TestEnv::new();
    env.fake_installed("3.12.1");
    let pinned = env.fake_installed("3.11.4");
    env.write_global("3.12.1");
    env.pin(&env.project, "3.11.4");
    let nested = env.project.join("src").join("pkg");
    fs::create_dir_all(&nested).unwrap();

    env.pyvm()
        .current_dir(&nested)
        .arg("which")
        .assert()
        .success()
        .stdout(predicate::str::contains(pinned.display().to_string()));
}

#[test]
fn test_which_fails_when_selected_version_missing() {
    let env = TestEnv::new();
    env.fake_installed("3.12.1");
    env.pin(&env.project, "3.8.10");

    env.pyvm()
        .arg("which")
        .assert()
        .failure()
        .stderr(predicate::str::contains("VERSION_NOT_INSTALLED"))
        .stderr(predicate::str::contains("3.8.10"));
}

#[test]
fn test_which_rejects_malformed_override_file() {
    let env = TestEnv::new();
    env.pin(&env.project, "3.12");

    env.pyvm()
        .arg("which")
        .assert()
        .failure()
        .stderr(predicate::str::contains("VERSION_INVALID"));
}

#[test]
fn test_which_without_any_python_fails() {
    let env = TestEnv::new();

    env.pyvm()
        .arg("which")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no Python found on PATH"));
}

#[cfg(unix)]
#[test]
fn test_which_falls_back_to_system_python() {
    let env = TestEnv::new();
    let system = pyvm_testkit::write_fake_python(&env.bin, "python3", "3.10.12");

    env.pyvm()
        .arg("which")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{} (system)\n", system.display())));

    env.pyvm()
        .args(["which", "--raw"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", system.display())));
}

#[cfg(unix)]
#[test]
fn test_which_system_probe_skips_shims() {
    let env = TestEnv::new();
    env.pyvm().arg("init").assert().success();
    let system = pyvm_testkit::write_fake_python(&env.bin, "python", "3.10.12");
    let path = std::env::join_paths([env.root.join("shims"), env.bin.clone()]).unwrap();

    env.pyvm()
        .env("PATH", path)
        .args(["which", "--raw"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", system.display())));
}

#[cfg(unix)]
#[test]
fn test_which_relative_root_never_resolves_to_shim() {
    let env = TestEnv::new();
    let relative_root = "../home/.pyvm";
    env.pyvm()
        .env("PYVM_ROOT", relative_root)
        .arg("init")
        .assert()
        .success();
    assert!(env.root.join("shims").join("python3").is_file());

    let system = pyvm_testkit::write_fake_python(&env.bin, "python3", "3.10.12");
    let path = std::env::join_paths([env.root.join("shims"), env.bin.clone()]).unwrap();

    env.pyvm()
        .env("PYVM_ROOT", relative_root)
        .env("PATH", path)
        .args(["which", "--raw"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", system.display())));
}
