//! Session type.
//!
//! A session summarizes one user's maximal run of events whose
//! consecutive gaps stay within the idle threshold.

use serde::{Deserialize, Serialize};

use crate::event::Meta;

/// Occurrence count of one event type within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCount {
    /// Event type
    #[serde(rename = "type")]
    pub event_type: String,

    /// Number of events of this type in the session
    pub count: usize,
}

impl TypeCount {
    pub fn new(event_type: impl Into<String>, count: usize) -> Self {
        Self {
            event_type: event_type.into(),
            count,
        }
    }
}

/// A session of user events.
///
/// Sessions own all of their data; nothing is shared with the events
/// they were built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// User all constituent events belong to
    pub user_id: String,

    /// Timestamp of the earliest event
    pub start_ts: i64,

    /// Timestamp of the latest event
    pub end_ts: i64,

    /// Distinct event types, ordered by first occurrence
    pub types: Vec<TypeCount>,

    /// Deep-merged metadata; earliest value wins on conflicts
    pub meta: Meta,
}

impl Session {
    /// Total number of events in the session
    pub fn event_count(&self) -> usize {
        self.types.iter().map(|t| t.count).sum()
    }

    /// Seconds between the first and last event
    pub fn duration_secs(&self) -> u64 {
        self.end_ts.abs_diff(self.start_ts)
    }

    /// Count for a given event type, if it occurred
    pub fn type_count(&self, event_type: &str) -> Option<usize> {
        self.types
            .iter()
            .find(|t| t.event_type == event_type)
            .map(|t| t.count)
    }
}
