//! Orphan Command CLI
//!
//! List and delete orphan WordPress entities and metadata.

use anyhow::Result;
use clap::Parser;
use orphan_core::{exit_codes, Config, OrphanError};
use tracing_subscriber::EnvFilter;

mod app;
mod commands;
mod output;

use app::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries rendered results
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        let code = e
            .downcast_ref::<OrphanError>()
            .map(OrphanError::exit_code)
            .unwrap_or(exit_codes::GENERAL_ERROR);
        std::process::exit(code);
    }
}

/// `RUST_LOG` when set, WARN otherwise; `-v` always raises it to DEBUG
fn log_filter(verbose: bool) -> EnvFilter {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if verbose {
        filter.add_directive(tracing::Level::DEBUG.into())
    } else {
        filter
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?.with_overrides(cli.db, cli.prefix);
    config.validate()?;

    match cli.command {
        Commands::Orphan(args) => commands::run(args, &config),
        Commands::Kinds => commands::kinds::run(),
    }
}
