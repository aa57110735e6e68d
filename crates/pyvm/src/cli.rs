//! CLI command structure using clap

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pyvm")]
#[command(version, about = "Build, select and run multiple Python versions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Stream build output and enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the pyvm root directory and shims
    Init,

    /// Build and install a Python version from source
    Install {
        /// Version to install (e.g., "3.12.1")
        version: String,

        /// Download the source archive even if it is cached
        #[arg(long)]
        no_cache: bool,
    },

    /// Remove an installed Python version
    Uninstall {
        /// Version to remove
        version: String,
    },

    /// Select the global Python version, installing it if needed
    Use {
        /// Version to use
        version: String,

        /// Download the source archive even if it is cached
        #[arg(long)]
        no_cache: bool,
    },

    /// List installed Python versions
    #[command(alias = "list")]
    Ls {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the path of the Python the shims would run
    Which {
        /// Print the path only
        #[arg(long)]
        raw: bool,
    },

    /// Show the selected Python version and where it comes from
    Version {
        /// Print the version only
        #[arg(long, conflicts_with = "json")]
        raw: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
