//! Sessionizer CLI library exports.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations (merge, validate, config)
//! - `input`: Decoding JSON array / NDJSON event input
//! - `output`: Rendering sessions as JSON, NDJSON, or a table

pub mod cli;
pub mod commands;
pub mod input;
pub mod output;

pub use cli::{Cli, Commands};
pub use commands::{
    handle_merge, handle_validate, init_logging, load_settings, run_merge, run_validate,
    show_config, ValidationReport,
};
