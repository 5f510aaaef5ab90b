//! This module provides the session output log that accumulates the result
//! of every dispatched request.
mod sink;

pub use sink::{LogSink, RenderedEntry, SessionLog};
