//! Event type for user activity.
//!
//! Events are immutable records of a single user action at a point in
//! time. They carry an arbitrary JSON metadata object.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::SessionError;

/// Free-form event metadata.
///
/// Keys keep their insertion order.
pub type Meta = Map<String, Value>;

/// A user activity event.
///
/// No field is unique: identical events are distinct entries and are
/// counted separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// User the event belongs to (non-empty)
    pub user_id: String,

    /// Epoch seconds; may be zero or negative
    pub ts: i64,

    /// Event type (the empty string is a normal value)
    #[serde(rename = "type")]
    pub event_type: String,

    /// Additional metadata, arbitrarily nested
    #[serde(default)]
    pub meta: Meta,
}

impl Event {
    /// Create a new event with empty metadata
    pub fn new(user_id: impl Into<String>, ts: i64, event_type: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ts,
            event_type: event_type.into(),
            meta: Meta::new(),
        }
    }

    /// Create a new event with metadata
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    /// Validate and convert one raw JSON event.
    ///
    /// `index` is the event's position in the caller's input and is
    /// reported in every error.
    pub fn from_value(index: usize, value: &Value) -> Result<Self, SessionError> {
        let obj = value
            .as_object()
            .ok_or(SessionError::NotAnObject { index })?;

        let user_id = match required(obj, index, "user_id")? {
            Value::String(s) if s.is_empty() => {
                return Err(SessionError::InvalidField {
                    index,
                    field: "user_id",
                    reason: "must not be empty".to_string(),
                })
            }
            Value::String(s) => s.clone(),
            other => return Err(type_mismatch(index, "user_id", "a string", other)),
        };

        let ts = match required(obj, index, "ts")? {
            Value::Number(n) => timestamp_from_number(index, n)?,
            other => return Err(type_mismatch(index, "ts", "an integer", other)),
        };

        let event_type = match required(obj, index, "type")? {
            Value::String(s) => s.clone(),
            other => return Err(type_mismatch(index, "type", "a string", other)),
        };

        // Absent and null metadata both mean "nothing to merge".
        let meta = match obj.get("meta") {
            None | Some(Value::Null) => Meta::new(),
            Some(Value::Object(m)) => m.clone(),
            Some(other) => return Err(type_mismatch(index, "meta", "an object", other)),
        };

        Ok(Self {
            user_id,
            ts,
            event_type,
            meta,
        })
    }
}

/// Validate a batch of raw JSON events.
///
/// Fails on the first invalid event; nothing is returned for the rest.
pub fn parse_events(values: &[Value]) -> Result<Vec<Event>, SessionError> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| Event::from_value(index, value))
        .collect()
}

fn required<'a>(
    obj: &'a Map<String, Value>,
    index: usize,
    field: &'static str,
) -> Result<&'a Value, SessionError> {
    obj.get(field)
        .ok_or(SessionError::MissingField { index, field })
}

fn type_mismatch(index: usize, field: &'static str, expected: &str, got: &Value) -> SessionError {
    SessionError::InvalidField {
        index,
        field,
        reason: format!("expected {}, got {}", expected, json_kind(got)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Integral floats (`1000.0`) are accepted; fractions and values outside
/// `i64` are not.
fn timestamp_from_number(index: usize, n: &Number) -> Result<i64, SessionError> {
    if let Some(ts) = n.as_i64() {
        return Ok(ts);
    }
    let invalid = |reason: String| SessionError::InvalidField {
        index,
        field: "ts",
        reason,
    };
    if n.is_u64() {
        return Err(invalid(format!("{} is out of range", n)));
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f as i64),
        Some(f) if f.fract() == 0.0 => Err(invalid(format!("{} is out of range", n))),
        _ => Err(invalid(format!("{} is not an integer", n))),
    }
}
