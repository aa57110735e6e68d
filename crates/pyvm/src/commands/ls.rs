//! `pyvm ls`

use crate::context::Context;
use crate::output;
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct LsOutput {
    versions: Vec<String>,
    current: Option<String>,
}

pub fn run(json: bool, verbose: bool) -> Result<()> {
    let ctx = Context::new(verbose)?;
    let versions = ctx.registry().list_installed_versions()?;

    let selected = ctx.selected_version();
    let current = (!selected.source.is_system()).then_some(selected.version);

    if json {
        return output::print_json(&LsOutput {
            versions: versions.iter().map(|v| v.to_string()).collect(),
            current,
        });
    }

    if versions.is_empty() {
        output::print_text("No versions installed!")?;
        return Ok(());
    }

    for version in &versions {
        let marker = if current.as_deref() == Some(version.as_str()) {
            "*"
        } else {
            " "
        };
        output::print_text(&format!("{} {}", marker, version))?;
    }
    Ok(())
}
