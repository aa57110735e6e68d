//! Integration tests for `pyvm init`

#![allow(deprecated)]

mod common;

use assert_cmd::assert::OutputAssertExt;
use common::TestEnv;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_init_creates_layout_and_shims() {
    let env = TestEnv::new();

    env.pyvm()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized pyvm"))
        .stdout(predicate::str::contains("shims"));

    for dir in ["cache", "runtimes", "shims"] {
        assert!(env.root.join(dir).is_dir(), "{} was not created", dir);
    }
    for shim in ["python", "python3", "pip", "pip3"] {
        let script = fs::read_to_string(env.root.join("shims").join(shim)).unwrap();
        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(script.contains("pyvm which --raw"));
    }
    assert!(!env.root.join("state.json").exists());
}

#[test]
fn test_init_is_idempotent() {
    let env = TestEnv::new();
    env.pyvm().arg("init").assert().success();
    env.write_global("3.12.1");

    env.pyvm()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("up to date"));

    assert_eq!(env.read_global().as_deref(), Some("3.12.1"));
}

#[test]
fn test_init_respects_home_when_root_unset() {
    let env = TestEnv::new();

    env.pyvm()
        .env_remove("PYVM_ROOT")
        .arg("init")
        .assert()
        .success();

    assert!(env.home.join(".pyvm").join("shims").join("python").is_file());
}

#[cfg(unix)]
#[test]
fn test_shim_runs_selected_interpreter() {
    use std::process::Command;

    let env = TestEnv::new();
    env.pyvm().arg("init").assert().success();
    env.fake_installed("3.12.1");
    env.pyvm().args(["use", "3.12.1"]).assert().success();

    let pyvm_dir = assert_cmd::cargo::cargo_bin("pyvm")
        .parent()
        .unwrap()
        .to_path_buf();
    let path = std::env::join_paths([env.root.join("shims"), pyvm_dir, env.bin.clone()]).unwrap();

    Command::new(env.root.join("shims").join("python3"))
        .current_dir(&env.project)
        .env("HOME", &env.home)
        .env("PYVM_ROOT", &env.root)
        .env("PATH", path)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("Python 3.12.1"));
}
