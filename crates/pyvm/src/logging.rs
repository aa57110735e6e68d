//! Diagnostic logging to stderr
//!
//! `PYVM_LOG` takes an `EnvFilter` directive (e.g. `pyvm_runtime=debug`).
//! Without it, only warnings are shown, or everything down to debug with
//! `--verbose`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "PYVM_LOG";

pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
