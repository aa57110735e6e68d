//! Integration tests for CLI infrastructure

#![allow(deprecated)]

mod common;

use assert_cmd::assert::OutputAssertExt;
use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_cli_version_flag() {
    let env = TestEnv::new();

    env.pyvm()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pyvm"));
}

#[test]
fn test_cli_help_lists_commands() {
    let env = TestEnv::new();

    let assert = env.pyvm().arg("--help").assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    for command in ["init", "install", "uninstall", "use", "ls", "which", "version"] {
        assert!(output.contains(command), "help is missing `{}`", command);
    }
    assert!(output.contains("--verbose"));
}

#[test]
fn test_cli_unknown_command_fails() {
    let env = TestEnv::new();

    env.pyvm()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("frobnicate"));
}

#[test]
fn test_cli_install_requires_version_argument() {
    let env = TestEnv::new();

    env.pyvm().arg("install").assert().failure();
    assert!(!env.root.exists());
}

#[test]
fn test_cli_errors_use_error_prefix_and_exit_code() {
    let env = TestEnv::new();

    env.pyvm()
        .args(["uninstall", "3.12"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error: VERSION_INVALID"));
}

#[test]
fn test_cli_list_alias() {
    let env = TestEnv::new();
    std::fs::create_dir_all(env.root.join("runtimes")).unwrap();

    env.pyvm()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No versions installed!"));
}

#[test]
fn test_cli_invalid_settings_file_is_reported() {
    let env = TestEnv::new();
    std::fs::create_dir_all(&env.root).unwrap();
    std::fs::write(env.root.join("config.toml"), "[install\njobs = ").unwrap();

    env.pyvm()
        .arg("version")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CONFIG_INVALID"));
}
