//! Session building library for sessionizer.
//!
//! Provides:
//! - Grouping of events by user (`grouper`)
//! - Idle-gap session splitting and reduction (`builder`, `merge`)
//! - Global ordering of sessions (`aggregate`)
//!
//! The whole pipeline is a pure function of its input: events are only
//! borrowed, and every returned session owns fresh copies of its data.

pub mod aggregate;
pub mod builder;
pub mod config;
pub mod grouper;
pub mod merge;

pub use aggregate::flatten_sorted;
pub use builder::{build_sessions, SessionBuilder};
pub use config::SessionConfig;
pub use grouper::{group_by_user, UserEvents, UserGroups};
pub use merge::{deep_merge, TypeTally};

use serde_json::Value;
use tracing::debug;

use sessionizer_types::{parse_events, Event, Session, SessionError};

/// Group events into sessions using the default 600 second gap.
pub fn merge_user_events(events: &[Event]) -> Vec<Session> {
    merge_user_events_with(events, SessionConfig::default())
}

/// Group events into sessions, sorted by `start_ts` ascending.
pub fn merge_user_events_with(events: &[Event], config: SessionConfig) -> Vec<Session> {
    let groups = group_by_user(events);
    let users = groups.len();

    let sessions = flatten_sorted(
        groups
            .into_iter()
            .map(|group| build_sessions(&group.events, config)),
    );

    debug!(
        events = events.len(),
        users = users,
        sessions = sessions.len(),
        gap_threshold_secs = config.gap_threshold_secs,
        "Merged user events"
    );

    sessions
}

/// Validate raw JSON events, then group them into sessions.
///
/// Every event is validated before any session is built; on error no
/// sessions are returned.
pub fn merge_raw_events(
    values: &[Value],
    config: SessionConfig,
) -> Result<Vec<Session>, SessionError> {
    config.validate()?;
    let events = parse_events(values)?;
    Ok(merge_user_events_with(&events, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sessionizer_types::TypeCount;

    fn raw(values: Value) -> Vec<Value> {
        values.as_array().cloned().unwrap()
    }

    #[test]
    fn test_empty_events() {
        assert!(merge_user_events(&[]).is_empty());
    }

    #[test]
    fn test_multiple_users_sorted_by_start() {
        let events = vec![
            Event::new("u2", 2000, "click"),
            Event::new("u1", 1000, "view"),
            Event::new("u1", 1500, "click"),
        ];

        let sessions = merge_user_events(&events);
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].user_id, "u1");
        assert_eq!(sessions[0].start_ts, 1000);
        assert_eq!(sessions[1].user_id, "u2");
        assert_eq!(sessions[1].start_ts, 2000);
    }

    #[test]
    fn test_unsorted_input() {
        let events = vec![
            Event::new("u1", 1500, "view"),
            Event::new("u1", 1000, "click"),
            Event::new("u1", 1200, "scroll"),
        ];

        let sessions = merge_user_events(&events);
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].start_ts, 1000);
        assert_eq!(sessions[0].end_ts, 1500);
        assert_eq!(
            sessions[0].types,
            vec![
                TypeCount::new("click", 1),
                TypeCount::new("scroll", 1),
                TypeCount::new("view", 1),
            ]
        );
    }

    #[test]
    fn test_interleaved_users_never_share_a_session() {
        let events = vec![
            Event::new("u1", 100, "a"),
            Event::new("u2", 110, "b"),
            Event::new("u1", 120, "c"),
            Event::new("u2", 130, "d"),
        ];

        let sessions = merge_user_events(&events);
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].user_id, "u1");
        assert_eq!(sessions[0].types.len(), 2);
        assert_eq!(sessions[1].user_id, "u2");
        assert_eq!(sessions[1].types.len(), 2);
    }

    #[test]
    fn test_custom_threshold() {
        let events = vec![Event::new("u1", 0, "a"), Event::new("u1", 100, "b")];
        assert_eq!(
            merge_user_events_with(&events, SessionConfig::with_gap_threshold(99)).len(),
            2
        );
        assert_eq!(
            merge_user_events_with(&events, SessionConfig::with_gap_threshold(100)).len(),
            1
        );
    }

    #[test]
    fn test_merge_raw_events() {
        let values = raw(json!([
            {"user_id": "u1", "ts": 1000, "type": "click", "meta": {"page": "/"}},
            {"user_id": "u1", "ts": 1100, "type": "view"}
        ]));

        let sessions = merge_raw_events(&values, SessionConfig::default()).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(Value::Object(sessions[0].meta.clone()), json!({"page": "/"}));
    }

    #[test]
    fn test_merge_raw_events_fails_without_partial_output() {
        let values = raw(json!([
            {"user_id": "u1", "ts": 1000, "type": "click"},
            {"user_id": "u1", "ts": 1100}
        ]));

        let err = merge_raw_events(&values, SessionConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            SessionError::MissingField {
                index: 1,
                field: "type"
            }
        ));
    }

    #[test]
    fn test_merge_raw_events_rejects_negative_threshold() {
        let err = merge_raw_events(&[], SessionConfig::with_gap_threshold(-5)).unwrap_err();
        assert!(matches!(err, SessionError::Config(_)));
    }
}
