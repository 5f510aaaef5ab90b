//! The output log sink.
//!
//! Every dispatcher reports its result through a `LogSink`: one formatted,
//! timestamped line per request, newest entry first. The concrete
//! `SessionLog` keeps the whole transcript in memory and can echo rendered
//! entries to the console as they land.
use std::sync::Mutex;

use chrono::Local;
use tokio::sync::mpsc;

const SUCCESS_LABEL: &str = "✅ SUCCESS";
const ERROR_LABEL: &str = "❌ ERROR";

/// Destination for dispatcher results.
///
/// Injectable so command handlers can be exercised against an inspectable
/// sink in tests. Recording is infallible: formatting must not fail for any
/// message content.
pub trait LogSink: Send + Sync {
    /// Appends one entry to the log, newest first.
    fn record(&self, message: &str, is_error: bool);
}

/// A single rendered log line, as delivered to the console printer.
#[derive(Debug, Clone)]
pub struct RenderedEntry {
    pub line: String,
    pub is_error: bool,
}

/// The in-memory session transcript.
///
/// Entries are prepended, so the buffer always reads newest-first. The
/// buffer is never truncated; it lives for the duration of the session.
pub struct SessionLog {
    buffer: Mutex<String>,
    echo: Mutex<Option<mpsc::UnboundedSender<RenderedEntry>>>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self {
            buffer: Mutex::new(String::new()),
            echo: Mutex::new(None),
        }
    }

    /// Sets the channel over which newly rendered entries are echoed.
    ///
    /// This is used to print entries to the console as they arrive.
    pub fn set_echo(&self, sender: mpsc::UnboundedSender<RenderedEntry>) {
        *self.echo.lock().unwrap() = Some(sender);
    }

    /// Returns the entire transcript, newest entry first.
    pub fn contents(&self) -> String {
        self.buffer.lock().unwrap().clone()
    }

    /// Formats one entry line: `[<timestamp>] <label>: <message>` plus a
    /// blank separator line.
    fn compose(timestamp: &str, is_error: bool, message: &str) -> String {
        let label = if is_error { ERROR_LABEL } else { SUCCESS_LABEL };
        format!("[{}] {}: {}\n\n", timestamp, label, message)
    }
}

impl Default for SessionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for SessionLog {
    fn record(&self, message: &str, is_error: bool) {
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        let line = Self::compose(&timestamp, is_error, message);

        self.buffer.lock().unwrap().insert_str(0, &line);

        if let Some(sender) = &*self.echo.lock().unwrap() {
            let _ = sender.send(RenderedEntry {
                line: line.trim_end().to_string(),
                is_error,
            });
        }
    }
}
