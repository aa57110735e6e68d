//! `pyvm use <version>`

use crate::commands::install::install_version;
use crate::context::Context;
use anyhow::Result;
use colored::Colorize;
use pyvm_core::RuntimeVersion;
use pyvm_runtime::VersionSource;

pub fn run(version: String, no_cache: bool, verbose: bool) -> Result<()> {
    let ctx = Context::new(verbose)?;
    let version = RuntimeVersion::parse(&version)?;

    if !ctx.registry().is_installed(&version) {
        println!("Python {} is not installed", version);
        install_version(&ctx, version.as_str(), no_cache)?;
    }

    ctx.state_store().write(&version)?;
    println!("{} Now using Python {}", "✓".green().bold(), version);

    // A project pin still wins inside its tree
    let selected = ctx.selected_version();
    if let VersionSource::OverrideFile(path) = &selected.source
        && selected.version != version.as_str()
    {
        eprintln!(
            "Warning: {} selects Python {} in this directory",
            path.display(),
            selected.version
        );
    }
    Ok(())
}
