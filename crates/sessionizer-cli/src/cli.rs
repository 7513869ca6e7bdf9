//! CLI argument parsing for sessionizer.
//!
//! CLI flags override all other config sources.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use sessionizer_types::OutputFormat;

/// Sessionizer
///
/// Groups timestamped user events into idle-gap sessions.
#[derive(Parser, Debug)]
#[command(name = "sessionizer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/sessionizer/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Sessionizer commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Group events into sessions
    Merge {
        /// Input file: JSON array or newline-delimited JSON (default: stdin)
        input: Option<PathBuf>,

        /// Override maximum idle gap between events of a session (seconds)
        #[arg(short, long)]
        gap_threshold: Option<i64>,

        /// Output format (json, ndjson, table)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Write sessions to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate events without building sessions
    Validate {
        /// Input file (default: stdin)
        input: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
