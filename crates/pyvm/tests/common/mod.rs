//! Shared setup for driving the `pyvm` binary
//!
//! Every command runs against an isolated root with a hermetic `PATH`, so
//! neither the developer's `~/.pyvm` nor their system Python leaks in.

#![allow(dead_code)]
#![allow(deprecated)] // cargo_bin is deprecated in newer assert_cmd

use assert_cmd::cargo::CommandCargoExt;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

pub struct TestEnv {
    _temp: TempDir,
    pub home: PathBuf,
    pub root: PathBuf,
    /// Only directory on `PATH` unless [`TestEnv::with_host_path`] is used
    pub bin: PathBuf,
    /// Working directory for commands
    pub project: PathBuf,
    host_path: bool,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp = pyvm_testkit::temp_dir_in_workspace();
        let home = temp.path().join("home");
        let bin = temp.path().join("bin");
        let project = temp.path().join("project");
        for dir in [&home, &bin, &project] {
            fs::create_dir_all(dir).unwrap();
        }

        Self {
            root: home.join(".pyvm"),
            home,
            bin,
            project,
            _temp: temp,
            host_path: false,
        }
    }

    /// Appends the host `PATH` after [`TestEnv::bin`]
    ///
    /// The fake `make` needs coreutils.
    pub fn with_host_path(mut self) -> Self {
        self.host_path = true;
        self
    }

    pub fn path_env(&self) -> OsString {
        let mut dirs = vec![self.bin.clone()];
        if self.host_path
            && let Some(host) = std::env::var_os("PATH")
        {
            dirs.extend(std::env::split_paths(&host));
        }
        std::env::join_paths(dirs).unwrap()
    }

    pub fn pyvm(&self) -> Command {
        let mut cmd = Command::cargo_bin("pyvm").unwrap();
        cmd.current_dir(&self.project)
            .env("HOME", &self.home)
            .env("PYVM_ROOT", &self.root)
            .env("PATH", self.path_env())
            .env_remove("PYVM_SOURCE_URL")
            .env_remove("PYVM_LOG");
        cmd
    }

    /// `pyvm` with the upstream pointed at `base_url`
    pub fn pyvm_with_source(&self, base_url: &str) -> Command {
        let mut cmd = self.pyvm();
        cmd.env("PYVM_SOURCE_URL", base_url);
        cmd
    }

    /// Lays out `runtimes/py-<version>` as a finished install would
    pub fn fake_installed(&self, version: &str) -> PathBuf {
        let minor = version.rsplit_once('.').unwrap().0;
        let bin = self
            .root
            .join("runtimes")
            .join(format!("py-{}", version))
            .join("bin");
        fs::create_dir_all(&bin).unwrap();
        let exe = bin.join(format!("python{}", minor));
        fs::write(&exe, format!("#!/bin/sh\necho \"Python {}\"\n", version)).unwrap();
        make_executable(&exe);
        exe
    }

    pub fn runtime_dir(&self, version: &str) -> PathBuf {
        self.root.join("runtimes").join(format!("py-{}", version))
    }

    pub fn write_global(&self, version: &str) {
        fs::create_dir_all(&self.root).unwrap();
        fs::write(
            self.root.join("state.json"),
            format!("{{\"globalVersion\": \"{}\"}}", version),
        )
        .unwrap();
    }

    pub fn read_global(&self) -> Option<String> {
        let text = fs::read_to_string(self.root.join("state.json")).ok()?;
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        value["globalVersion"].as_str().map(str::to_string)
    }

    pub fn pin(&self, dir: &Path, version: &str) -> PathBuf {
        let file = dir.join(".python-version");
        fs::write(&file, format!("{}\n", version)).unwrap();
        file
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}
