//! `pyvm version`

use crate::context::Context;
use crate::output;
use anyhow::Result;
use colored::Colorize;
use pyvm_core::RuntimeVersion;
use serde::Serialize;

#[derive(Serialize)]
struct VersionOutput {
    version: String,
    source: String,
    installed: bool,
}

pub fn run(raw: bool, json: bool, verbose: bool) -> Result<()> {
    let ctx = Context::new(verbose)?;
    let selected = ctx.selected_version();

    // The system source is never parsed: its probe output is free-form
    let parsed = (!selected.source.is_system()).then(|| RuntimeVersion::parse(&selected.version));
    let installed = match &parsed {
        None => !selected.version.is_empty(),
        Some(Ok(version)) => ctx.registry().is_installed(version),
        Some(Err(_)) => false,
    };

    if json {
        return output::print_json(&VersionOutput {
            version: selected.version,
            source: selected.source.to_string(),
            installed,
        });
    }

    match &parsed {
        Some(Err(e)) => {
            eprintln!("{} {} (set by {})", "Warning:".yellow().bold(), e, selected.source);
        }
        Some(Ok(version)) if !installed => {
            eprintln!(
                "{} Python {} is not installed (run `pyvm install {}`)",
                "Warning:".yellow().bold(),
                version,
                version
            );
        }
        _ => {}
    }

    if raw {
        output::print_text(&selected.version)?;
    } else if selected.source.is_system() {
        let shown = if selected.version.is_empty() {
            "none"
        } else {
            selected.version.as_str()
        };
        output::print_text(&format!("{} (system)", shown))?;
    } else {
        output::print_text(&format!(
            "{} (set by {})",
            selected.version, selected.source
        ))?;
    }
    Ok(())
}
