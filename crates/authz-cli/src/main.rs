//! authz-sync CLI
//!
//! Checks that generated authorization type files match the schema they are
//! rendered from, and optionally rewrites the ones that drifted.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to initialise logging: {}", "warning".yellow().bold(), e);
    }

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Run the selected command; `Ok(false)` means the check failed.
fn run(cli: Cli) -> Result<bool> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Some(Commands::Check(args)) => commands::run_check(&cwd, &cli.project, &args),
        None => commands::run_check(&cwd, &cli.project, &cli.check),
        Some(Commands::Templates) => {
            commands::run_templates(&cwd, &cli.project)?;
            Ok(true)
        }
        Some(Commands::Render { template }) => {
            commands::run_render(&cwd, &cli.project, &template)?;
            Ok(true)
        }
    }
}
