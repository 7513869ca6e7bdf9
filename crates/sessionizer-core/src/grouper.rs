//! Partitioning of events by user.

use std::collections::HashMap;

use tracing::trace;

use sessionizer_types::Event;

/// One user's events in chronological order.
#[derive(Debug, Clone)]
pub struct UserEvents<'a> {
    pub user_id: &'a str,
    pub events: Vec<&'a Event>,
}

/// Events grouped by user, in the order users were first seen.
#[derive(Debug, Default)]
pub struct UserGroups<'a> {
    groups: Vec<UserEvents<'a>>,
    index: HashMap<&'a str, usize>,
}

impl<'a> UserGroups<'a> {
    /// Events for a given user, if any.
    pub fn get(&self, user_id: &str) -> Option<&UserEvents<'a>> {
        self.index.get(user_id).map(|&i| &self.groups[i])
    }

    /// Groups in user discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &UserEvents<'a>> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for UserGroups<'a> {
    type Item = UserEvents<'a>;
    type IntoIter = std::vec::IntoIter<UserEvents<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

/// Group events by `user_id`.
///
/// Each user's events are sorted by `ts` with a stable sort, so events
/// sharing a timestamp keep their input order. Input is only borrowed.
pub fn group_by_user(events: &[Event]) -> UserGroups<'_> {
    let mut groups = UserGroups::default();

    for event in events {
        let slot = match groups.index.get(event.user_id.as_str()) {
            Some(&i) => i,
            None => {
                let i = groups.groups.len();
                groups.index.insert(event.user_id.as_str(), i);
                groups.groups.push(UserEvents {
                    user_id: event.user_id.as_str(),
                    events: Vec::new(),
                });
                i
            }
        };
        groups.groups[slot].events.push(event);
    }

    for group in &mut groups.groups {
        group.events.sort_by_key(|e| e.ts);
        trace!(user_id = group.user_id, events = group.events.len(), "Grouped user events");
    }

    groups
}
