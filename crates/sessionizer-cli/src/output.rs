//! Rendering sessions for output.

use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};

use sessionizer_types::{OutputFormat, Session, SessionError};

/// Write sessions to `writer` in the requested format.
pub fn write_sessions<W: Write>(
    writer: &mut W,
    sessions: &[Session],
    format: OutputFormat,
) -> Result<(), SessionError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, sessions)?;
            writeln!(writer)?;
        }
        OutputFormat::Ndjson => {
            for session in sessions {
                serde_json::to_writer(&mut *writer, session)?;
                writeln!(writer)?;
            }
        }
        OutputFormat::Table => {
            writeln!(writer, "USER\tSTART\tEND\tEVENTS\tTYPES")?;
            for session in sessions {
                writeln!(writer, "{}", table_row(session))?;
            }
        }
    }
    Ok(())
}

/// One tab-separated line describing a session.
pub fn table_row(session: &Session) -> String {
    let types = session
        .types
        .iter()
        .map(|t| format!("{}:{}", t.event_type, t.count))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{}\t{}\t{}\t{}\t{}",
        session.user_id,
        format_ts(session.start_ts),
        format_ts(session.end_ts),
        session.event_count(),
        types
    )
}

/// RFC 3339 UTC time, or the raw number when it is out of chrono's range.
fn format_ts(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| ts.to_string())
}
