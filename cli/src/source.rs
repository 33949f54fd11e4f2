//! JSON-lines log source adapter.
//!
//! The persisted log is one JSON object per line:
//!
//! ```text
//! {"type": "GameWasStarted", "timestamp": "2021-01-01T00:00:02Z", "payload": {"game_id": "g-1"}}
//! ```
//!
//! The adapter opens the file lazily and yields events one at a time, in
//! file order; the stream is forward-only and non-restartable. An
//! unopenable file or an undecodable line means the source itself is
//! unusable and surfaces as
//! [`ReplayError::Configuration`] — the replay engine sees it before
//! dispatching the offending record and aborts with no report.

use async_stream::try_stream;
use chrono::{DateTime, Utc};
use futures::Stream;
use quizlog_core::error::{ReplayError, Result};
use quizlog_core::event::Event;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

/// One persisted log record, as stored on disk.
#[derive(Debug, Deserialize)]
struct LogRecord {
    #[serde(rename = "type")]
    event_type: String,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    payload: HashMap<String, String>,
}

fn decode_line(line: &str, number: usize) -> Result<Event> {
    let record: LogRecord = serde_json::from_str(line).map_err(|e| {
        ReplayError::Configuration(format!("malformed log record at line {number}: {e}"))
    })?;
    Ok(Event::new(record.event_type, record.timestamp, record.payload))
}

fn unreadable(path: &Path, e: &std::io::Error) -> ReplayError {
    ReplayError::Configuration(format!("cannot read log '{}': {e}", path.display()))
}

/// Open a log file as a lazy, finite, ordered event stream.
///
/// Blank lines are skipped. Errors (unopenable file, unreadable or
/// undecodable line) are yielded in-stream as
/// [`ReplayError::Configuration`], terminating the stream.
pub fn open_log(path: PathBuf) -> impl Stream<Item = Result<Event>> {
    try_stream! {
        let file = File::open(&path).await.map_err(|e| {
            ReplayError::Configuration(format!("cannot open log '{}': {e}", path.display()))
        })?;
        let mut lines = BufReader::new(file).lines();
        let mut number = 0usize;

        while let Some(line) = lines.next_line().await.map_err(|e| unreadable(&path, &e))? {
            number += 1;
            if line.trim().is_empty() {
                continue;
            }
            yield decode_line(&line, number)?;
        }
        tracing::debug!(path = %path.display(), lines = number, "Log exhausted");
    }
}
