//! Sessionizer
//!
//! Groups timestamped user events into idle-gap sessions.
//!
//! # Usage
//!
//! ```bash
//! sessionizer merge events.json [--gap-threshold SECS] [--format json|ndjson|table]
//! sessionizer validate events.ndjson
//! sessionizer config
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/sessionizer/config.toml)
//! 3. Environment variables (SESSIONIZER_*)
//! 4. CLI flags

use std::io;

use anyhow::Result;

use sessionizer_cli::{
    handle_merge, handle_validate, init_logging, load_settings, show_config, Cli, Commands,
};

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let settings = load_settings(cli.config.as_deref(), cli.log_level.as_deref())?;
    init_logging(&settings.log_level);

    match cli.command {
        Commands::Merge {
            input,
            gap_threshold,
            format,
            output,
        } => {
            handle_merge(settings, input.as_deref(), gap_threshold, format, output)?;
        }
        Commands::Validate { input } => {
            handle_validate(input.as_deref())?;
        }
        Commands::Config => {
            show_config(&settings, io::stdout().lock())?;
        }
    }

    Ok(())
}
