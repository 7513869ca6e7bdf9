//! Configuration for session building.

use serde::{Deserialize, Serialize};

use sessionizer_types::{SessionError, Settings, DEFAULT_GAP_THRESHOLD_SECS};

/// Configuration for splitting a user's events into sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Maximum gap between consecutive events of one session (seconds).
    /// A gap of exactly this many seconds stays in the same session.
    pub gap_threshold_secs: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            gap_threshold_secs: DEFAULT_GAP_THRESHOLD_SECS,
        }
    }
}

impl SessionConfig {
    pub fn with_gap_threshold(gap_threshold_secs: i64) -> Self {
        Self { gap_threshold_secs }
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

impl From<&Settings> for SessionConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            gap_threshold_secs: settings.gap_threshold_secs,
        }
    }
}
