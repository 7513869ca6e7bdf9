//! Command implementations for sessionizer.
//!
//! Handles:
//! - merge: Read events, build sessions, write them out
//! - validate: Check events without building sessions
//! - config: Print the effective settings

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use sessionizer_core::{group_by_user, merge_raw_events, SessionConfig};
use sessionizer_types::{parse_events, OutputFormat, Settings};

use crate::input::{open_input, read_events};
use crate::output::write_sessions;

/// Initialize logging to stderr.
///
/// `RUST_LOG` takes precedence over the configured level. Repeated calls
/// are ignored.
pub fn init_logging(log_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .try_init();
}

/// Load configuration (defaults -> file -> env) and apply the global
/// CLI override for the log level.
pub fn load_settings(config_path: Option<&str>, log_level_override: Option<&str>) -> Result<Settings> {
    let mut settings = Settings::load(config_path).context("Failed to load configuration")?;
    if let Some(log_level) = log_level_override {
        settings.log_level = log_level.to_string();
    }
    Ok(settings)
}

/// Read events from `reader`, build sessions, and write them to `writer`.
///
/// Returns the number of sessions written. Nothing is written when the
/// input fails validation.
pub fn run_merge<R: io::Read, W: Write>(
    reader: R,
    mut writer: W,
    config: SessionConfig,
    format: OutputFormat,
) -> Result<usize> {
    let values = read_events(reader).context("Failed to read events")?;
    let sessions = merge_raw_events(&values, config)?;

    write_sessions(&mut writer, &sessions, format).context("Failed to write sessions")?;
    writer.flush().context("Failed to write sessions")?;

    info!(
        events = values.len(),
        sessions = sessions.len(),
        "Merged events into sessions"
    );
    Ok(sessions.len())
}

/// Summary of a successful validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub events: usize,
    pub users: usize,
}

/// Validate events from `reader` and report what was found.
pub fn run_validate<R: io::Read, W: Write>(reader: R, mut writer: W) -> Result<ValidationReport> {
    let values = read_events(reader).context("Failed to read events")?;
    let events = parse_events(&values)?;
    let report = ValidationReport {
        events: events.len(),
        users: group_by_user(&events).len(),
    };

    writeln!(
        writer,
        "Valid: {} events from {} users",
        report.events, report.users
    )?;
    Ok(report)
}

/// Print the effective settings as TOML.
pub fn show_config<W: Write>(settings: &Settings, mut writer: W) -> Result<()> {
    let text = toml::to_string_pretty(settings).context("Failed to render configuration")?;
    write!(writer, "{}", text)?;
    Ok(())
}

/// Handle `sessionizer merge`.
pub fn handle_merge(
    mut settings: Settings,
    input: Option<&Path>,
    gap_threshold_override: Option<i64>,
    format_override: Option<OutputFormat>,
    output: Option<PathBuf>,
) -> Result<usize> {
    if let Some(gap) = gap_threshold_override {
        settings.gap_threshold_secs = gap;
    }
    if let Some(format) = format_override {
        settings.output_format = format;
    }
    settings.validate()?;

    let config = SessionConfig::from(&settings);
    let reader = open_input(input).context("Failed to open input")?;

    match output {
        Some(path) => {
            // Render fully before touching the file so a failed merge
            // leaves any existing output in place.
            let mut rendered = Vec::new();
            let count = run_merge(reader, &mut rendered, config, settings.output_format)?;
            fs::write(&path, rendered)
                .with_context(|| format!("Failed to write output file {:?}", path))?;
            info!("Wrote {} sessions to {:?}", count, path);
            Ok(count)
        }
        None => run_merge(reader, io::stdout().lock(), config, settings.output_format),
    }
}

/// Handle `sessionizer validate`.
pub fn handle_validate(input: Option<&Path>) -> Result<ValidationReport> {
    let reader = open_input(input).context("Failed to open input")?;
    run_validate(reader, io::stdout().lock())
}
