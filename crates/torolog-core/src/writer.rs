//! Serialized writes of encoded events to one sink.
//!
//! Events are encoded outside the lock and written with a single
//! `write_all`, so concurrent emitters never interleave within a line.

use std::io::Write;

use parking_lot::Mutex;

use crate::error::LogResult;
use crate::event::Event;

/// Writer that appends one JSON line per event to a sink.
pub struct EventWriter<W> {
    sink: Mutex<W>,
}

impl<W: Write> EventWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    /// Encode and write an event, then flush the sink.
    pub fn write_event(&self, event: &Event<'_>) -> LogResult<()> {
        let line = event.to_json_line()?;

        let mut sink = self.sink.lock();
        sink.write_all(&line)?;
        sink.flush()?;

        Ok(())
    }

    /// Write an event, reporting failures through `tracing` instead of
    /// returning them.
    pub fn emit(&self, event: &Event<'_>) {
        if let Err(e) = self.write_event(event) {
            tracing::warn!(
                error = %e,
                level = %event.level(),
                "failed to write log event"
            );
        }
    }

    pub fn flush(&self) -> LogResult<()> {
        self.sink.lock().flush()?;
        Ok(())
    }

    /// Release the sink.
    pub fn into_inner(self) -> W {
        self.sink.into_inner()
    }
}

impl<W> std::fmt::Debug for EventWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventWriter").finish_non_exhaustive()
    }
}
