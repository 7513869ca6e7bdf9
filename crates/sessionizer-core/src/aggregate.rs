//! Flattening and global ordering of per-user sessions.

use sessionizer_types::Session;

/// Flatten per-user session lists and order them by `start_ts`.
///
/// The sort is stable: sessions sharing a start time stay in user
/// discovery order, then in their within-user order.
pub fn flatten_sorted<I>(per_user: I) -> Vec<Session>
where
    I: IntoIterator<Item = Vec<Session>>,
{
    let mut sessions: Vec<Session> = per_user.into_iter().flatten().collect();
    sessions.sort_by_key(|s| s.start_ts);
    sessions
}
