//! External command execution
//!
//! Every subprocess the pipeline and the resolver start (configure, make,
//! the system interpreter probe) goes through [`CommandRunner`], so tests can
//! substitute a scripted runner and never invoke real build tools.
//!
//! Subprocesses run without a timeout; a source build takes as long as it
//! takes.

use pyvm_core::{PyvmError, Result};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Instant;

/// Where subprocess output goes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Collect stdout/stderr; shown only on failure
    #[default]
    Capture,
    /// Inherit the terminal so output appears live
    Stream,
}

impl OutputMode {
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            OutputMode::Stream
        } else {
            OutputMode::Capture
        }
    }
}

/// A command to run
#[derive(Debug, Clone)]
pub struct ExecOptions {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub cwd: PathBuf,
    pub output: OutputMode,
}

impl ExecOptions {
    pub fn new(program: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
            output: OutputMode::default(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    /// Program file name, e.g. `configure` or `make`
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }

    /// Shell-like rendering for messages and logs
    pub fn display(&self) -> String {
        let mut rendered = self.program.display().to_string();
        for arg in &self.args {
            rendered.push(' ');
            rendered.push_str(&arg.to_string_lossy());
        }
        rendered
    }
}

/// Result of command execution
#[derive(Debug, Clone, Default)]
pub struct ExecResult {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
}

impl ExecResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn status_label(&self) -> String {
        match self.exit_code {
            Some(code) => code.to_string(),
            None => "signal".to_string(),
        }
    }
}

/// Capability to run external commands
pub trait CommandRunner {
    /// Runs the command and reports its exit status
    ///
    /// A non-zero exit is not an error here; only failure to start is.
    fn run(&self, options: &ExecOptions) -> Result<ExecResult>;

    /// Runs the command, turning a non-zero exit into
    /// [`PyvmError::CommandFailed`]
    fn run_checked(&self, options: &ExecOptions) -> Result<ExecResult> {
        let result = self.run(options)?;
        if result.success() {
            Ok(result)
        } else {
            Err(PyvmError::command_failed(
                options.display(),
                result.status_label(),
                &options.cwd,
                &result.stderr,
            ))
        }
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, options: &ExecOptions) -> Result<ExecResult> {
        (**self).run(options)
    }
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, options: &ExecOptions) -> Result<ExecResult> {
        tracing::debug!("running `{}` in {}", options.display(), options.cwd.display());

        let mut command = Command::new(&options.program);
        command.args(&options.args).current_dir(&options.cwd);

        let start = Instant::now();
        let spawn_error = |e| PyvmError::CommandSpawnFailed {
            command: options.display(),
            source: e,
        };

        let result = match options.output {
            OutputMode::Stream => {
                let status = command
                    .stdin(Stdio::null())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .map_err(spawn_error)?;
                ExecResult {
                    exit_code: status.code(),
                    ..ExecResult::default()
                }
            }
            OutputMode::Capture => {
                let output = command.stdin(Stdio::null()).output().map_err(spawn_error)?;
                ExecResult {
                    exit_code: output.status.code(),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                    duration_ms: 0,
                }
            }
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        tracing::debug!(
            "`{}` exited with {} after {}ms",
            options.program_name(),
            result.status_label(),
            duration_ms
        );

        Ok(ExecResult {
            duration_ms,
            ..result
        })
    }
}
