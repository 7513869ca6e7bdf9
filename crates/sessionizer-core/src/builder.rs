//! Session building engine.
//!
//! Splits one user's chronologically sorted events into sessions on idle
//! gaps, then reduces each run into a `Session`.

use tracing::{debug, trace};

use sessionizer_types::{Event, Meta, Session};

use crate::config::SessionConfig;
use crate::merge::{deep_merge, TypeTally};

/// Builder for creating one user's sessions from a stream of events.
///
/// A session boundary is a time gap strictly greater than the configured
/// threshold. Events are expected in ascending `ts` order and must all
/// belong to the same user; `group_by_user` produces such streams.
pub struct SessionBuilder<'a> {
    config: SessionConfig,

    /// Events in the session being built
    current_events: Vec<&'a Event>,
    /// Timestamp of the last event added
    last_ts: Option<i64>,
}

impl<'a> SessionBuilder<'a> {
    /// Create a new session builder with the given configuration.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            current_events: Vec::new(),
            last_ts: None,
        }
    }

    /// Add an event to the builder.
    ///
    /// Returns Some(Session) if a boundary was detected and the previous
    /// session completed.
    pub fn add_event(&mut self, event: &'a Event) -> Option<Session> {
        trace!(user_id = %event.user_id, ts = event.ts, event_type = %event.event_type, "Processing event");

        if let Some(last_ts) = self.last_ts {
            // Widened so the full i64 range cannot overflow or clamp.
            let gap = i128::from(event.ts) - i128::from(last_ts);
            if gap > i128::from(self.config.gap_threshold_secs) && !self.current_events.is_empty()
            {
                debug!(
                    gap = gap,
                    threshold = self.config.gap_threshold_secs,
                    "Idle gap boundary detected"
                );
                let session = self.flush_session();
                self.add_event_internal(event);
                return Some(session);
            }
        }

        self.add_event_internal(event);
        None
    }

    fn add_event_internal(&mut self, event: &'a Event) {
        self.last_ts = Some(event.ts);
        self.current_events.push(event);
    }

    /// Reduce the current events into a completed session.
    fn flush_session(&mut self) -> Session {
        let events = std::mem::take(&mut self.current_events);
        let session = reduce_session(&events);

        debug!(
            user_id = %session.user_id,
            start_ts = session.start_ts,
            end_ts = session.end_ts,
            events = events.len(),
            types = session.types.len(),
            "Created session"
        );

        session
    }

    /// Flush any remaining events as a final session.
    ///
    /// Call this when processing is complete to get any remaining events.
    pub fn flush(&mut self) -> Option<Session> {
        if self.current_events.is_empty() {
            return None;
        }
        let session = self.flush_session();
        self.last_ts = None;
        Some(session)
    }

    /// Check if builder has pending events.
    pub fn has_pending(&self) -> bool {
        !self.current_events.is_empty()
    }

    /// Get current event count.
    pub fn current_event_count(&self) -> usize {
        self.current_events.len()
    }
}

/// Reduce a non-empty run of one user's events into a session.
///
/// Events are folded in slice order: the first occurrence of a type fixes
/// its position and the earliest metadata value wins.
fn reduce_session(events: &[&Event]) -> Session {
    let mut start_ts = i64::MAX;
    let mut end_ts = i64::MIN;
    let mut tally = TypeTally::new();
    let mut meta = Meta::new();

    for event in events {
        start_ts = start_ts.min(event.ts);
        end_ts = end_ts.max(event.ts);
        tally.record(&event.event_type);
        deep_merge(&mut meta, &event.meta);
    }

    Session {
        user_id: events
            .first()
            .map(|e| e.user_id.clone())
            .unwrap_or_default(),
        start_ts,
        end_ts,
        types: tally.into_types(),
        meta,
    }
}

/// Split one user's sorted events into sessions.
pub fn build_sessions(events: &[&Event], config: SessionConfig) -> Vec<Session> {
    let mut builder = SessionBuilder::new(config);
    let mut sessions = Vec::new();

    for &event in events {
        if let Some(session) = builder.add_event(event) {
            sessions.push(session);
        }
    }

    if let Some(session) = builder.flush() {
        sessions.push(session);
    }

    sessions
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use sessionizer_types::TypeCount;

    fn event_at(ts: i64, event_type: &str) -> Event {
        Event::new("u1", ts, event_type)
    }

    fn event_with_meta(ts: i64, event_type: &str, meta: Value) -> Event {
        event_at(ts, event_type).with_meta(meta.as_object().cloned().unwrap())
    }

    fn refs(events: &[Event]) -> Vec<&Event> {
        events.iter().collect()
    }

    #[test]
    fn test_gap_at_threshold_stays_in_session() {
        let events = vec![event_at(1000, "click"), event_at(1600, "view")];
        let sessions = build_sessions(&refs(&events), SessionConfig::default());

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].start_ts, 1000);
        assert_eq!(sessions[0].end_ts, 1600);
    }

    #[test]
    fn test_gap_over_threshold_splits() {
        let events = vec![event_at(1000, "click"), event_at(1601, "view")];
        let sessions = build_sessions(&refs(&events), SessionConfig::default());

        assert_eq!(sessions.len(), 2);
        assert_eq!((sessions[0].start_ts, sessions[0].end_ts), (1000, 1000));
        assert_eq!((sessions[1].start_ts, sessions[1].end_ts), (1601, 1601));
    }

    #[test]
    fn test_builder_returns_session_on_boundary() {
        let events = vec![
            event_at(1000, "click"),
            event_at(1500, "view"),
            event_at(2200, "click"),
        ];

        let mut builder = SessionBuilder::new(SessionConfig::default());
        assert!(builder.add_event(&events[0]).is_none());
        assert!(builder.add_event(&events[1]).is_none());
        assert_eq!(builder.current_event_count(), 2);

        let session = builder.add_event(&events[2]).unwrap();
        assert_eq!(session.event_count(), 2);
        assert_eq!(session.end_ts, 1500);
        assert!(builder.has_pending());

        let last = builder.flush().unwrap();
        assert_eq!(last.start_ts, 2200);
        assert!(!builder.has_pending());
    }

    #[test]
    fn test_flush_empty_builder() {
        let mut builder = SessionBuilder::new(SessionConfig::default());
        assert!(builder.flush().is_none());
    }

    #[test]
    fn test_identical_timestamps_never_split() {
        let events = vec![event_at(5, "a"), event_at(5, "b"), event_at(5, "a")];
        let sessions = build_sessions(&refs(&events), SessionConfig::with_gap_threshold(0));

        assert_eq!(sessions.len(), 1);
        assert_eq!(
            sessions[0].types,
            vec![TypeCount::new("a", 2), TypeCount::new("b", 1)]
        );
    }

    #[test]
    fn test_single_event_session() {
        let events = vec![event_with_meta(1000, "click", json!({"page": "/"}))];
        let sessions = build_sessions(&refs(&events), SessionConfig::default());

        assert_eq!(sessions.len(), 1);
        let session = &sessions[0];
        assert_eq!(session.start_ts, 1000);
        assert_eq!(session.end_ts, 1000);
        assert_eq!(session.types, vec![TypeCount::new("click", 1)]);
        assert_eq!(session.meta, events[0].meta);
    }

    #[test]
    fn test_type_order_and_counts() {
        let events = vec![
            event_at(1000, "click"),
            event_at(1100, "view"),
            event_at(1200, "click"),
            event_at(1300, "scroll"),
        ];
        let sessions = build_sessions(&refs(&events), SessionConfig::default());

        assert_eq!(
            sessions[0].types,
            vec![
                TypeCount::new("click", 2),
                TypeCount::new("view", 1),
                TypeCount::new("scroll", 1),
            ]
        );
    }

    #[test]
    fn test_meta_merge_earliest_wins() {
        let events = vec![
            event_with_meta(1000, "click", json!({"page": "/home", "tags": {"a": 1}})),
            event_with_meta(1100, "view", json!({"page": "/about", "tags": {"a": 2, "b": 3}})),
        ];
        let sessions = build_sessions(&refs(&events), SessionConfig::default());

        assert_eq!(
            Value::Object(sessions[0].meta.clone()),
            json!({"page": "/home", "tags": {"a": 1, "b": 3}})
        );
    }

    #[test]
    fn test_meta_not_shared_between_sessions() {
        let events = vec![
            event_with_meta(0, "a", json!({"k": {"v": 1}})),
            event_with_meta(10_000, "b", json!({"k": {"v": 2}})),
        ];
        let mut sessions = build_sessions(&refs(&events), SessionConfig::default());

        sessions[0].meta.insert("extra".to_string(), json!(true));
        assert!(!sessions[1].meta.contains_key("extra"));
        assert!(!events[0].meta.contains_key("extra"));
    }

    #[test]
    fn test_extreme_timestamps_do_not_overflow() {
        let events = vec![event_at(i64::MIN, "a"), event_at(i64::MAX, "b")];
        let sessions = build_sessions(&refs(&events), SessionConfig::default());
        assert_eq!(sessions.len(), 2);
    }

    #[test]
    fn test_full_range_gap_exceeds_max_threshold() {
        let events = vec![event_at(i64::MIN, "a"), event_at(i64::MAX, "b")];
        let sessions = build_sessions(&refs(&events), SessionConfig::with_gap_threshold(i64::MAX));
        assert_eq!(sessions.len(), 2);
    }

    #[test]
    fn test_max_threshold_joins_gap_of_exactly_max() {
        let events = vec![event_at(0, "a"), event_at(i64::MAX, "b")];
        let sessions = build_sessions(&refs(&events), SessionConfig::with_gap_threshold(i64::MAX));
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].duration_secs(), i64::MAX as u64);
    }
}
