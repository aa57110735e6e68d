//! `pyvm uninstall <version>`

use crate::context::Context;
use anyhow::Result;
use colored::Colorize;
use pyvm_core::RuntimeVersion;

pub fn run(version: String, verbose: bool) -> Result<()> {
    let ctx = Context::new(verbose)?;
    let version = RuntimeVersion::parse(&version)?;

    let removed = ctx.registry().uninstall(&version)?;
    tracing::debug!("removed {}", removed.display());

    println!("{} Uninstalled Python {}", "✓".green().bold(), version);

    let state = ctx.state_store().read_or_default();
    if state.global_version() == Some(version.as_str()) {
        eprintln!(
            "Warning: Python {} is still the global version; run `pyvm use <version>` to pick another",
            version
        );
    }
    Ok(())
}
