//! Per-invocation context for CLI commands

use anyhow::{Context as _, Result};
use pyvm_core::{Config, RuntimeRegistry, StateStore};
use pyvm_runtime::{Resolver, SelectedVersion, SystemRunner};
use std::path::PathBuf;

/// Configuration and collaborators shared by every command
pub struct Context {
    pub config: Config,
    pub cwd: PathBuf,
    pub verbose: bool,
    pub runner: SystemRunner,
}

impl Context {
    /// Reads the environment once: root, settings, PATH, working directory
    pub fn new(verbose: bool) -> Result<Self> {
        let config = Config::from_env()?;
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        tracing::debug!("pyvm root: {}", config.root.display());

        Ok(Self {
            config,
            cwd,
            verbose,
            runner: SystemRunner,
        })
    }

    pub fn state_store(&self) -> StateStore {
        StateStore::new(&self.config)
    }

    pub fn registry(&self) -> RuntimeRegistry {
        RuntimeRegistry::new(&self.config)
    }

    pub fn resolver(&self) -> Resolver<'_, SystemRunner> {
        Resolver::new(&self.config, &self.runner)
    }

    /// The version the shims would run here and now
    pub fn selected_version(&self) -> SelectedVersion {
        let state = self.state_store().read_or_default();
        self.resolver().resolve(&state, &self.cwd)
    }
}
