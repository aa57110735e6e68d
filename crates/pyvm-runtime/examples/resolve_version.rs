//! Shows which Python the shims would run from the current directory
//!
//! Run with: cargo run --example resolve_version

use pyvm_core::{Config, RuntimeRegistry, RuntimeVersion, StateStore};
use pyvm_runtime::{Resolver, SystemRunner};

fn main() -> pyvm_core::Result<()> {
    let config = Config::from_env()?;
    let cwd = std::env::current_dir().map_err(|e| pyvm_core::PyvmError::io("read", ".", e))?;

    let state = StateStore::new(&config).read_or_default();
    let selected = Resolver::new(&config, &SystemRunner).resolve(&state, &cwd);

    println!("Version: {}", selected.version);
    println!("Source:  {}", selected.source);

    if selected.source.is_system() {
        return Ok(());
    }

    let registry = RuntimeRegistry::new(&config);
    match RuntimeVersion::parse(&selected.version) {
        Ok(version) if registry.is_installed(&version) => {
            println!("Path:    {}", registry.executable(&version).display());
        }
        Ok(_) => println!("(not installed)"),
        Err(e) => println!("(invalid: {})", e),
    }

    Ok(())
}
