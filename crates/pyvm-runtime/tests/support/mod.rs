//! Scripted command runner for pipeline tests
//!
//! Stands in for configure and make. `make altinstall` creates the stub
//! interpreter under the prefix passed to configure, the way the real
//! alternate install would.

#![allow(dead_code)]

use pyvm_core::{Config, Result};
use pyvm_runtime::{CommandRunner, ExecOptions, ExecResult, OutputMode};
use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct Call {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub output: OutputMode,
}

impl Call {
    /// `configure`, `make -j4`, `make altinstall`
    pub fn label(&self) -> String {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().filter(|a| !a.starts_with("--")).cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Default)]
pub struct ScriptedRunner {
    calls: Mutex<Vec<Call>>,
    prefix: Mutex<Option<PathBuf>>,
    /// (label prefix, exit code, stderr)
    failure: Option<(String, i32, String)>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the first command whose label starts with `label` exit with `code`
    pub fn failing_on(label: &str, code: i32, stderr: &str) -> Self {
        Self {
            failure: Some((label.to_string(), code, stderr.to_string())),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn labels(&self) -> Vec<String> {
        self.calls().iter().map(Call::label).collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, options: &ExecOptions) -> Result<ExecResult> {
        let call = Call {
            program: options.program_name(),
            args: options
                .args
                .iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect(),
            cwd: options.cwd.clone(),
            output: options.output,
        };
        let label = call.label();
        self.calls.lock().unwrap().push(call.clone());

        if let Some((failing, code, stderr)) = &self.failure
            && label.starts_with(failing.as_str())
        {
            return Ok(ExecResult {
                exit_code: Some(*code),
                stderr: stderr.clone(),
                ..ExecResult::default()
            });
        }

        if let Some(prefix) = call.args.iter().find_map(|a| a.strip_prefix("--prefix=")) {
            *self.prefix.lock().unwrap() = Some(PathBuf::from(prefix));
        }

        if label == "make altinstall" {
            let prefix = self.prefix.lock().unwrap().clone().expect("configure ran first");
            let minor = prefix
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_prefix("py-"))
                .and_then(|v| v.rsplit_once('.'))
                .map(|(head, _)| head.to_string())
                .expect("prefix names a runtime dir");
            let bin = prefix.join("bin");
            std::fs::create_dir_all(&bin).unwrap();
            std::fs::write(bin.join(format!("python{}", minor)), "#!/bin/sh\n").unwrap();
        }

        Ok(ExecResult {
            exit_code: Some(0),
            stdout: format!("{} ok\n", label),
            ..ExecResult::default()
        })
    }
}

/// Initialized root whose source URL points at `base_url`
pub fn config_for(root: &std::path::Path, base_url: &str) -> Config {
    let mut config = Config::new(root);
    config.settings.install.source_url = base_url.to_string();
    config.ensure_layout().unwrap();
    config
}
