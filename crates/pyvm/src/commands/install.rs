//! `pyvm install <version>`

use crate::context::Context;
use anyhow::Result;
use colored::Colorize;
use pyvm_runtime::{InstallError, InstallOptions, InstallStage, Installer, PackageMetadata};

pub fn run(version: String, no_cache: bool, verbose: bool) -> Result<()> {
    let ctx = Context::new(verbose)?;
    let metadata = install_version(&ctx, &version, no_cache)?;

    println!(
        "{} Installed Python {} into {}",
        "✓".green().bold(),
        metadata.version,
        metadata.install_path.display()
    );
    Ok(())
}

/// Runs the pipeline with stage progress on stdout
///
/// Shared with `pyvm use`, which installs missing versions.
pub(crate) fn install_version(
    ctx: &Context,
    version: &str,
    no_cache: bool,
) -> Result<PackageMetadata> {
    let options = InstallOptions {
        version: version.to_string(),
        no_cache,
        verbose: ctx.verbose,
    };
    let total = InstallStage::ALL.len();

    println!("Installing Python {}", version.trim());
    let installer = Installer::new(&ctx.config, &ctx.runner).on_stage(move |stage| {
        let step = InstallStage::ALL
            .iter()
            .position(|s| *s == stage)
            .map_or(0, |i| i + 1);
        println!("  [{}/{}] {}", step, total, stage);
    });

    installer.install(&options).map_err(|e| {
        report_partial_install(ctx, &e);
        e.into()
    })
}

/// A failure after configure may leave files under the target prefix
fn report_partial_install(ctx: &Context, error: &InstallError) {
    if !matches!(error.stage, InstallStage::Install | InstallStage::Cleanup) {
        return;
    }
    let Ok(version) = pyvm_core::RuntimeVersion::parse(&error.version) else {
        return;
    };
    let target = ctx.config.runtime_dir(&version);
    if target.exists() {
        eprintln!(
            "{} {} may be incomplete; remove it with `pyvm uninstall {}`",
            "✗".red().bold(),
            target.display(),
            version
        );
    }
}
