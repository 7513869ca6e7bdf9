//! End-to-end test infrastructure for sessionizer.
//!
//! Provides event builders, a seeded random event generator, and a
//! checker for the invariants every session listing must satisfy.

use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

use sessionizer_types::{Event, Meta, Session};

/// Create an event without metadata.
pub fn event(user_id: &str, ts: i64, event_type: &str) -> Event {
    Event::new(user_id, ts, event_type)
}

/// Create an event with metadata given as a JSON object.
pub fn event_with_meta(user_id: &str, ts: i64, event_type: &str, meta: Value) -> Event {
    Event::new(user_id, ts, event_type).with_meta(as_meta(meta))
}

/// Convert a JSON object literal into `Meta`.
pub fn as_meta(value: Value) -> Meta {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

const EVENT_TYPES: [&str; 5] = ["click", "view", "scroll", "submit", ""];
const PAGES: [&str; 4] = ["/", "/home", "/about", "/cart"];

/// Generate `count` events for `users` users from a fixed seed.
///
/// Timestamps follow a per-user random walk: mostly short steps, some
/// steps of exactly the 600s threshold, some zero-length steps, and
/// occasional long idle gaps. The result is shuffled so input order is
/// not chronological.
pub fn random_events(seed: u64, count: usize, users: usize) -> Vec<Event> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut clocks: Vec<i64> = (0..users).map(|_| rng.random_range(-5_000..5_000)).collect();
    let mut events = Vec::with_capacity(count);

    for _ in 0..count {
        let user = rng.random_range(0..users);
        let step = match rng.random_range(0..10u8) {
            0 => 0,
            1 => 600,
            2 => 601,
            3 => rng.random_range(601..10_000),
            _ => rng.random_range(1..600),
        };
        clocks[user] += step;

        let event_type = EVENT_TYPES[rng.random_range(0..EVENT_TYPES.len())];
        let meta = if rng.random_bool(0.2) {
            Meta::new()
        } else {
            as_meta(json!({
                "page": PAGES[rng.random_range(0..PAGES.len())],
                "ctx": {"n": rng.random_range(0..3i64), "flag": rng.random_bool(0.5)},
            }))
        };

        events.push(Event::new(format!("user-{}", user), clocks[user], event_type).with_meta(meta));
    }

    events.shuffle(&mut rng);
    events
}

/// Assert every structural invariant of a session listing.
pub fn assert_session_invariants(events: &[Event], sessions: &[Session], gap_threshold_secs: i64) {
    let total: usize = sessions.iter().map(Session::event_count).sum();
    assert_eq!(total, events.len(), "every event belongs to exactly one session");

    for pair in sessions.windows(2) {
        assert!(pair[0].start_ts <= pair[1].start_ts, "sessions sorted by start_ts");
    }

    let mut by_user: HashMap<&str, Vec<i64>> = HashMap::new();
    for e in events {
        by_user.entry(e.user_id.as_str()).or_default().push(e.ts);
    }
    for ts in by_user.values_mut() {
        ts.sort_unstable();
    }

    let mut per_user_sessions: HashMap<&str, Vec<&Session>> = HashMap::new();
    for session in sessions {
        assert!(session.start_ts <= session.end_ts);

        let mut seen = HashSet::new();
        for t in &session.types {
            assert!(seen.insert(t.event_type.as_str()), "duplicate type {:?}", t.event_type);
            assert!(t.count > 0);
        }

        let user_ts = by_user
            .get(session.user_id.as_str())
            .unwrap_or_else(|| panic!("session for unknown user {}", session.user_id));
        let inside: Vec<i64> = user_ts
            .iter()
            .copied()
            .filter(|&ts| ts >= session.start_ts && ts <= session.end_ts)
            .collect();

        assert_eq!(inside.first(), Some(&session.start_ts), "start_ts is an event ts");
        assert_eq!(inside.last(), Some(&session.end_ts), "end_ts is an event ts");
        assert_eq!(inside.len(), session.event_count(), "session owns its time window");
        for pair in inside.windows(2) {
            assert!(pair[1] - pair[0] <= gap_threshold_secs, "gap within session");
        }

        per_user_sessions
            .entry(session.user_id.as_str())
            .or_default()
            .push(session);
    }

    for list in per_user_sessions.values() {
        for pair in list.windows(2) {
            assert!(
                pair[1].start_ts - pair[0].end_ts > gap_threshold_secs,
                "gap between sessions of one user exceeds the threshold"
            );
        }
    }
}
