//! `pyvm init`

use crate::context::Context;
use anyhow::Result;
use colored::Colorize;
use pyvm_runtime::ShimGenerator;

pub fn run(verbose: bool) -> Result<()> {
    let ctx = Context::new(verbose)?;
    let already = ctx.config.is_initialized();

    ctx.config.ensure_layout()?;
    ShimGenerator::new(&ctx.config).write_all()?;

    if already {
        println!(
            "{} pyvm root {} is up to date",
            "✓".green().bold(),
            ctx.config.root.display()
        );
    } else {
        println!(
            "{} Initialized pyvm in {}",
            "✓".green().bold(),
            ctx.config.root.display()
        );
    }
    println!();
    println!("Add the shims to the front of your PATH:");
    println!("  export PATH=\"{}:$PATH\"", ctx.config.shims_dir().display());

    Ok(())
}
