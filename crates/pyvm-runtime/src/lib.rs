//! Python runtime resolution, installation and shims for pyvm.
//!
//! # Architecture
//!
//! - [`exec`]: the one capability used to run external commands
//! - [`info`]: the resolver's result types
//! - [`resolve`]: override file, global version, system fallback
//! - [`install`]: staged source build pipeline with a download cache
//! - [`upstream`]: HTTP client and source URL construction
//! - [`shim`]: indirection scripts placed on PATH
//!
//! # Resolution Flow
//!
//! ```text
//! Resolver::resolve(state, cwd)
//!     ↓
//! 1. .python-version in cwd or any parent
//!     ↓ (none, or only empty files)
//! 2. state.json globalVersion
//!     ↓ (unset)
//! 3. python3/python on PATH minus <root>/shims, `--version`
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use pyvm_core::{Config, StateStore};
//! use pyvm_runtime::{InstallOptions, Installer, Resolver, SystemRunner};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let runner = SystemRunner;
//!
//! let metadata = Installer::new(&config, &runner).install(&InstallOptions::new("3.12.1"))?;
//! println!("installed into {}", metadata.install_path.display());
//!
//! let state = StateStore::new(&config).read_or_default();
//! let selected = Resolver::new(&config, &runner).resolve(&state, &std::env::current_dir()?);
//! println!("{} ({})", selected.version, selected.source);
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod exec;
pub mod info;
pub mod install;
pub mod resolve;
pub mod shim;
pub mod upstream;

// Re-export commonly used types
pub use exec::{CommandRunner, ExecOptions, ExecResult, OutputMode, SystemRunner};
pub use info::{SelectedVersion, VersionSource};
pub use install::{InstallError, InstallOptions, InstallStage, Installer, PackageMetadata};
pub use resolve::{Resolver, find_override_file};
pub use shim::{SHIMS, ShimGenerator};

// Type alias for convenience
pub type Result<T> = pyvm_core::Result<T>;
