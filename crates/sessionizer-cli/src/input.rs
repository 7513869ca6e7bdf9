//! Decoding raw events from JSON text.
//!
//! Two layouts are accepted: a single JSON array of events, or
//! newline-delimited JSON with one event per line.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde_json::Value;

use sessionizer_types::SessionError;

/// Open `path` for reading, or stdin when it is absent or `-`.
pub fn open_input(path: Option<&Path>) -> io::Result<Box<dyn Read>> {
    match path {
        Some(p) if p != Path::new("-") => Ok(Box::new(File::open(p)?)),
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

/// Read all of `reader` and decode it into raw events.
pub fn read_events<R: Read>(mut reader: R) -> Result<Vec<Value>, SessionError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    decode_events(&text)
}

/// Decode raw events from a JSON array or NDJSON text.
///
/// Blank input decodes to no events.
pub fn decode_events(text: &str) -> Result<Vec<Value>, SessionError> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed)
            .map_err(|e| SessionError::InvalidInput(format!("malformed JSON array: {}", e)));
    }

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line)
                .map_err(|e| SessionError::InvalidInput(format!("line {}: {}", i + 1, e)))
        })
        .collect()
}
