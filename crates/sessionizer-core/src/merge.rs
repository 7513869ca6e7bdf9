//! Reduction helpers: metadata deep-merge and ordered type tallies.

use std::collections::HashMap;

use serde_json::Value;

use sessionizer_types::{Meta, TypeCount};

/// Fold `incoming` into `acc`, keeping earlier values.
///
/// Keys missing from `acc` are copied in. When both sides hold an
/// object the two are merged recursively; any other collision keeps the
/// value already in `acc`.
pub fn deep_merge(acc: &mut Meta, incoming: &Meta) {
    for (key, value) in incoming {
        if let Some(existing) = acc.get_mut(key) {
            if let (Value::Object(existing), Value::Object(value)) = (existing, value) {
                deep_merge(existing, value);
            }
        } else {
            acc.insert(key.clone(), value.clone());
        }
    }
}

/// Event type counts in first-occurrence order.
#[derive(Debug, Default)]
pub struct TypeTally {
    entries: Vec<TypeCount>,
    index: HashMap<String, usize>,
}

impl TypeTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `event_type`.
    pub fn record(&mut self, event_type: &str) {
        match self.index.get(event_type) {
            Some(&i) => self.entries[i].count += 1,
            None => {
                self.index
                    .insert(event_type.to_string(), self.entries.len());
                self.entries.push(TypeCount::new(event_type, 1));
            }
        }
    }

    /// Number of distinct types seen
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_types(self) -> Vec<TypeCount> {
        self.entries
    }
}
