//! packvars CLI
//!
//! Command-line front end for the packvars variable core.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose).map_err(|e| CliError::Logging(e.to_string()))?;
    tracing::debug!(command = ?cli.command, "Starting");

    match cli.command {
        Commands::Varfile { files, output } => commands::run_varfile(&files, output.as_deref()),
        Commands::Context { pack, vars } => commands::run_context(&pack, &vars),
        Commands::Flatten { legacy, vars } => commands::run_flatten(legacy.as_deref(), &vars),
    }
}
