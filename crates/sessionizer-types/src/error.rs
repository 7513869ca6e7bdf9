//! Error types for sessionizer.

use thiserror::Error;

/// Unified error type for session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Raw event is not a JSON object
    #[error("Event {index}: expected a JSON object")]
    NotAnObject { index: usize },

    /// Raw event lacks a required field
    #[error("Event {index}: missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    /// Raw event field has the wrong type or an unusable value
    #[error("Event {index}: invalid field `{field}`: {reason}")]
    InvalidField {
        index: usize,
        field: &'static str,
        reason: String,
    },

    /// Input could not be interpreted as events at all
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SessionError {
    /// Index of the offending event, for validation errors.
    pub fn event_index(&self) -> Option<usize> {
        match self {
            SessionError::NotAnObject { index }
            | SessionError::MissingField { index, .. }
            | SessionError::InvalidField { index, .. } => Some(*index),
            _ => None,
        }
    }
}
