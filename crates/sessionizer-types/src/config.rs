//! Configuration loading for sessionizer.
//!
//! Layered config: defaults -> config file -> env vars -> CLI flags.
//! The default config file lives at ~/.config/sessionizer/config.toml
//! (platform equivalent via `directories`).

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::SessionError;

/// Default maximum idle time between consecutive events of one session.
pub const DEFAULT_GAP_THRESHOLD_SECS: i64 = 600;

/// How sessions are rendered by the CLI.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON array
    #[default]
    Json,
    /// One compact JSON session per line
    Ndjson,
    /// Human-readable lines
    Table,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Ndjson => write!(f, "ndjson"),
            OutputFormat::Table => write!(f, "table"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "ndjson" | "jsonl" => Ok(OutputFormat::Ndjson),
            "table" => Ok(OutputFormat::Table),
            other => Err(format!(
                "unknown output format '{}' (expected json, ndjson, or table)",
                other
            )),
        }
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Maximum gap in seconds between consecutive events of one session
    #[serde(default = "default_gap_threshold_secs")]
    pub gap_threshold_secs: i64,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format for session listings
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_gap_threshold_secs() -> i64 {
    DEFAULT_GAP_THRESHOLD_SECS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gap_threshold_secs: default_gap_threshold_secs(),
            log_level: default_log_level(),
            output_format: OutputFormat::default(),
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/sessionizer/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (SESSIONIZER_*)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, SessionError> {
        let mut builder = Config::builder()
            .set_default("gap_threshold_secs", default_gap_threshold_secs())
            .map_err(|e| SessionError::Config(e.to_string()))?
            .set_default("log_level", default_log_level())
            .map_err(|e| SessionError::Config(e.to_string()))?
            .set_default("output_format", OutputFormat::default().to_string())
            .map_err(|e| SessionError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path().to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Format: SESSIONIZER_GAP_THRESHOLD_SECS, SESSIONIZER_LOG_LEVEL, ...
        builder = builder.add_source(
            Environment::with_prefix("SESSIONIZER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Settings = builder
            .build()
            .map_err(|e| SessionError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SessionError::Config(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.gap_threshold_secs < 0 {
            return Err(SessionError::Config(format!(
                "gap_threshold_secs must be >= 0, got {}",
                self.gap_threshold_secs
            )));
        }
        Ok(())
    }
}

/// Default config file location, without extension.
pub fn default_config_path() -> PathBuf {
    ProjectDirs::from("", "", "sessionizer")
        .map(|p| p.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config")
}
