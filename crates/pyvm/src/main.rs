mod cli;
mod commands;
mod context;
mod logging;
mod output;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Init => commands::init::run(cli.verbose),
        Commands::Install { version, no_cache } => {
            commands::install::run(version, no_cache, cli.verbose)
        }
        Commands::Uninstall { version } => commands::uninstall::run(version, cli.verbose),
        Commands::Use { version, no_cache } => {
            commands::use_version::run(version, no_cache, cli.verbose)
        }
        Commands::Ls { json } => commands::ls::run(json, cli.verbose),
        Commands::Which { raw } => commands::which::run(raw, cli.verbose),
        Commands::Version { raw, json } => commands::version::run(raw, json, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
