//! `pyvm which`
//!
//! `--raw` output is what the shims exec, so it must be a bare path.

use crate::context::Context;
use crate::output;
use anyhow::{Result, anyhow};
use pyvm_core::{PyvmError, RuntimeVersion};

pub fn run(raw: bool, verbose: bool) -> Result<()> {
    let ctx = Context::new(verbose)?;
    let selected = ctx.selected_version();

    if selected.source.is_system() {
        let executable = ctx
            .resolver()
            .system_executable(&ctx.cwd)
            .ok_or_else(|| anyhow!("no Python found on PATH and no version selected"))?;
        let line = if raw {
            executable.display().to_string()
        } else {
            format!("{} (system)", executable.display())
        };
        output::print_text(&line)?;
        return Ok(());
    }

    let version = RuntimeVersion::parse(&selected.version)?;
    let registry = ctx.registry();
    if !registry.is_installed(&version) {
        return Err(PyvmError::VersionNotInstalled {
            version: version.to_string(),
        }
        .into());
    }

    output::print_text(&registry.executable(&version).display().to_string())?;
    Ok(())
}
