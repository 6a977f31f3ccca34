//! streamprep CLI
//!
//! Reads a host file record and prints the decision record as JSON.
//!
//! # Usage
//!
//! ```bash
//! streamprep sanitize --file record.json
//! streamprep --node unraid_node order --file record.json --input lowerBound=2000
//! streamprep check-size --new-size 400 --original-size 1000
//! streamprep details new_file_size_check
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use streamprep_cli::adapters::TomlConfigAdapter;
use streamprep_cli::app::DefaultAppContainer;
use streamprep_cli::cli::{commands, Cli, Commands};
use streamprep_cli::ports::ConfigPort;
use streamprep_cli::utils::logging::{build_filter, init_logging, LogFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = TomlConfigAdapter::new(cli.config.clone())
        .load_settings()
        .context("Failed to load settings")?;

    let filter = build_filter(cli.log_level.as_deref(), &settings.logging.level)?;
    let format: LogFormat = cli
        .log_format
        .as_deref()
        .unwrap_or(settings.logging.format.as_str())
        .parse()?;
    init_logging(filter, format);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting streamprep");

    let container = DefaultAppContainer::new(&settings, cli.node.clone())?;

    match cli.command {
        Commands::Sanitize(args) => commands::sanitize(&container, args)?,
        Commands::Order(args) => commands::order(&container, args)?,
        Commands::CheckSize(args) => commands::check_size(&container, args)?,
        Commands::Details(args) => commands::details(args)?,
    }

    Ok(())
}
