//! Installation pipeline: build a CPython version from source
//!
//! Stages run strictly in order and the first failure aborts the run,
//! reporting the stage it happened in:
//!
//! ```text
//! Validate  -> version format, root layout, per-version install lock
//! Download  -> reuse <cache>/Python-<v>.tgz or fetch it
//! Extract   -> unpack into <cache>/Python-<v>/
//! Configure -> ./configure --prefix=<runtimes>/py-<v> <configure options>
//! Build     -> make -j<jobs>
//! Install   -> make altinstall
//! Cleanup   -> remove <cache>/Python-<v>/ (the archive is kept)
//! ```
//!
//! The scratch tree is removed on failure too. A partially installed
//! runtime directory is not rolled back; `pyvm uninstall` removes it.

pub mod download;
pub mod extract;

use crate::exec::{CommandRunner, ExecOptions, OutputMode};
use crate::upstream;
use download::FetchOutcome;
use pyvm_core::{Config, PyvmError, RuntimeVersion, lock};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// How long a second install of the same version waits for the first
pub const INSTALL_LOCK_TIMEOUT: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstallStage {
    Validate,
    Download,
    Extract,
    Configure,
    Build,
    Install,
    Cleanup,
}

impl InstallStage {
    pub const ALL: [InstallStage; 7] = [
        InstallStage::Validate,
        InstallStage::Download,
        InstallStage::Extract,
        InstallStage::Configure,
        InstallStage::Build,
        InstallStage::Install,
        InstallStage::Cleanup,
    ];

    /// Pipeline state once this stage has completed
    pub fn completed_state(self) -> &'static str {
        match self {
            InstallStage::Validate => "Validated",
            InstallStage::Download => "Downloaded",
            InstallStage::Extract => "Extracted",
            InstallStage::Configure => "Configured",
            InstallStage::Build => "Built",
            InstallStage::Install => "Installed",
            InstallStage::Cleanup => "CleanedUp",
        }
    }
}

impl fmt::Display for InstallStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstallStage::Validate => "validate",
            InstallStage::Download => "download",
            InstallStage::Extract => "extract",
            InstallStage::Configure => "configure",
            InstallStage::Build => "build",
            InstallStage::Install => "install",
            InstallStage::Cleanup => "cleanup",
        };
        f.write_str(name)
    }
}

/// Pipeline failure, tagged with the stage that failed
#[derive(Debug, Error)]
#[error("INSTALL_FAILED: installing Python {version} failed at the {stage} stage: {source}")]
pub struct InstallError {
    pub version: String,
    pub stage: InstallStage,
    #[source]
    pub source: PyvmError,
}

#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    /// Version as typed by the user; validated by the pipeline
    pub version: String,
    /// Fetch the archive even when a cached copy exists
    pub no_cache: bool,
    /// Stream build tool output instead of capturing it
    pub verbose: bool,
}

impl InstallOptions {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..Self::default()
        }
    }
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMetadata {
    pub archive_path: PathBuf,
    pub install_path: PathBuf,
    pub version: RuntimeVersion,
}

pub struct Installer<'a, R: CommandRunner + ?Sized> {
    config: &'a Config,
    runner: &'a R,
    on_stage: Option<Box<dyn Fn(InstallStage) + 'a>>,
}

impl<'a, R: CommandRunner + ?Sized> Installer<'a, R> {
    pub fn new(config: &'a Config, runner: &'a R) -> Self {
        Self {
            config,
            runner,
            on_stage: None,
        }
    }

    /// Called as each stage starts
    pub fn on_stage(mut self, callback: impl Fn(InstallStage) + 'a) -> Self {
        self.on_stage = Some(Box::new(callback));
        self
    }

    pub fn install(&self, options: &InstallOptions) -> Result<PackageMetadata, InstallError> {
        let raw = options.version.trim();
        let settings = &self.config.settings;
        let output = OutputMode::from_verbose(options.verbose);

        self.enter(InstallStage::Validate, raw);
        let version = RuntimeVersion::parse(raw).map_err(at(InstallStage::Validate, raw))?;
        self.config
            .ensure_layout()
            .map_err(at(InstallStage::Validate, raw))?;
        let _lock = lock::acquire_lock(
            &self.config.install_lock_path(&version),
            INSTALL_LOCK_TIMEOUT,
            &format!("install Python {}", version),
        )
        .map_err(PyvmError::from)
        .map_err(at(InstallStage::Validate, raw))?;

        self.enter(InstallStage::Download, raw);
        let archive_path = self.config.archive_path(&version);
        let url = upstream::source_archive_url(&settings.install.source_url, &version)
            .map_err(at(InstallStage::Download, raw))?;
        let client = upstream::build_client(Duration::from_secs(settings.network.timeout_secs))
            .map_err(|e| PyvmError::NetworkFetchFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })
            .map_err(at(InstallStage::Download, raw))?;
        match download::fetch_cached(&client, &url, &archive_path, options.no_cache)
            .map_err(at(InstallStage::Download, raw))?
        {
            FetchOutcome::Cached => tracing::info!("using cached {}", archive_path.display()),
            FetchOutcome::Downloaded(bytes) => tracing::info!("downloaded {} bytes", bytes),
        }

        self.enter(InstallStage::Extract, raw);
        let archive_name = Config::archive_name(&version);
        let scratch = extract::extract_source(
            &archive_path,
            &self.config.cache_dir(),
            extract::scratch_root_name(&archive_name),
        )
        .map_err(at(InstallStage::Extract, raw))?;

        let install_path = self.config.runtime_dir(&version);

        self.enter(InstallStage::Configure, raw);
        let configure = ExecOptions::new(scratch.path().join("configure"), scratch.path())
            .arg(format!("--prefix={}", install_path.display()))
            .args(&settings.install.configure_options)
            .output(output);
        self.runner
            .run_checked(&configure)
            .map_err(at(InstallStage::Configure, raw))?;

        self.enter(InstallStage::Build, raw);
        let build = ExecOptions::new("make", scratch.path())
            .arg(format!("-j{}", settings.install.jobs))
            .output(output);
        self.runner
            .run_checked(&build)
            .map_err(at(InstallStage::Build, raw))?;

        self.enter(InstallStage::Install, raw);
        // altinstall never creates a bare `python`, so a system runtime
        // sharing the prefix could not be shadowed
        let altinstall = ExecOptions::new("make", scratch.path())
            .arg("altinstall")
            .output(output);
        self.runner
            .run_checked(&altinstall)
            .map_err(at(InstallStage::Install, raw))?;

        self.enter(InstallStage::Cleanup, raw);
        scratch.remove().map_err(at(InstallStage::Cleanup, raw))?;

        tracing::info!("installed Python {} into {}", version, install_path.display());
        Ok(PackageMetadata {
            archive_path,
            install_path,
            version,
        })
    }

    fn enter(&self, stage: InstallStage, version: &str) {
        tracing::info!("{} stage for Python {}", stage, version);
        if let Some(callback) = &self.on_stage {
            callback(stage);
        }
    }
}

fn at(stage: InstallStage, version: &str) -> impl FnOnce(PyvmError) -> InstallError + '_ {
    move |source| InstallError {
        version: version.to_string(),
        stage,
        source,
    }
}
