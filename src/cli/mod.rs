//! CLI module for streamprep
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// streamprep
///
/// Decides how a media file should be cleaned, reordered and transcoded
/// before (and validated after) a host runs ffmpeg on it. Reads the host's
/// JSON file record and prints the decision record as JSON.
#[derive(Parser, Debug)]
#[command(name = "streamprep")]
#[command(about = "Stream cleaning, ordering and size checks for a transcode host")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level or filter directive (overrides RUST_LOG and settings)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_parser = ["pretty", "compact", "json"])]
    pub log_format: Option<String>,

    /// Settings file (TOML); defaults to ./streamprep.toml when present
    #[arg(long, global = true, env = "STREAMPREP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Execution node name (overrides the node environment variable)
    #[arg(long, global = true)]
    pub node: Option<String>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Remove data streams, unwanted audio/subtitles and titles
    Sanitize(args::SanitizeArgs),
    /// Order streams and decide whether to transcode
    Order(args::OrderArgs),
    /// Validate the processed file size against the original
    CheckSize(args::CheckSizeArgs),
    /// Print plugin details as JSON
    Details(args::DetailsArgs),
}
