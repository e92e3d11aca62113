//! The leveled logging facade.
//!
//! A [`Logger`] owns one [`EventWriter`] and the minimum level it was built
//! with. Neither changes after construction.

use std::error::Error as StdError;
use std::io::Write;

use torolog_core::{Event, EventWriter, Field, Level, LoggerConfig};

type FatalHook = Box<dyn Fn() + Send + Sync>;

/// Structured logger writing one JSON line per event.
pub struct Logger<W> {
    writer: EventWriter<W>,
    level: Level,
    on_fatal: FatalHook,
}

impl<W: Write> Logger<W> {
    /// Create an unfiltered logger writing to `output`.
    pub fn new(output: W) -> Self {
        Self::builder(output).build()
    }

    /// Create a logger that drops events below `level`.
    pub fn with_level(output: W, level: Level) -> Self {
        Self::builder(output).level(level).build()
    }

    /// Create a logger from a numeric level code.
    ///
    /// Codes outside `-1..=6` fall back to an unfiltered logger, as if
    /// [`Logger::new`] had been called.
    pub fn with_level_code(output: W, code: i32) -> Self {
        Self::builder(output).level_code(code).build()
    }

    pub fn from_config(output: W, config: &LoggerConfig) -> Self {
        Self::builder(output).level(config.level()).build()
    }

    pub fn builder(output: W) -> LoggerBuilder<W> {
        LoggerBuilder::new(output)
    }

    /// The level recorded at construction.
    pub fn get_level(&self) -> Level {
        self.level
    }

    /// Log without a level. Never filtered.
    pub fn log(&self, msg: &str, fields: &[Field]) {
        self.write(Level::NoLevel, msg, None, fields);
    }

    pub fn trace(&self, msg: &str, err: Option<&dyn StdError>, fields: &[Field]) {
        self.write(Level::Trace, msg, err, fields);
    }

    pub fn debug(&self, msg: &str, fields: &[Field]) {
        self.write(Level::Debug, msg, None, fields);
    }

    pub fn info(&self, msg: &str, fields: &[Field]) {
        self.write(Level::Info, msg, None, fields);
    }

    pub fn warn(&self, msg: &str, fields: &[Field]) {
        self.write(Level::Warn, msg, None, fields);
    }

    pub fn error(&self, msg: &str, err: Option<&dyn StdError>, fields: &[Field]) {
        self.write(Level::Error, msg, err, fields);
    }

    /// Log at fatal level, then run the fatal hook.
    ///
    /// The default hook exits the process with status 1. Nothing happens
    /// when the event is filtered out.
    pub fn fatal(&self, msg: &str, err: Option<&dyn StdError>, fields: &[Field]) {
        if self.write(Level::Fatal, msg, err, fields) {
            self.flush();
            (self.on_fatal)();
        }
    }

    /// Log at panic level, then panic with `msg`.
    pub fn panic(&self, msg: &str, err: Option<&dyn StdError>, fields: &[Field]) {
        if self.write(Level::Panic, msg, err, fields) {
            self.flush();
            panic!("{}", msg);
        }
    }

    /// Release the sink.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    /// Returns whether the event passed the level filter.
    fn write(&self, level: Level, msg: &str, err: Option<&dyn StdError>, fields: &[Field]) -> bool {
        if !self.level.allows(level) {
            return false;
        }
        let event = Event::new(level, msg, fields).with_error(err);
        self.writer.emit(&event);
        true
    }

    fn flush(&self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!(error = %e, "failed to flush log sink");
        }
    }
}

impl<W> std::fmt::Debug for Logger<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

/// Builder for a [`Logger`].
pub struct LoggerBuilder<W> {
    output: W,
    level: Level,
    on_fatal: Option<FatalHook>,
}

impl<W: Write> LoggerBuilder<W> {
    pub fn new(output: W) -> Self {
        Self {
            output,
            level: Level::NoLevel,
            on_fatal: None,
        }
    }

    /// Set the minimum level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the minimum level from a numeric code; invalid codes leave the
    /// logger unfiltered.
    pub fn level_code(mut self, code: i32) -> Self {
        self.level = match Level::from_code(code) {
            Some(level) => level,
            None => {
                tracing::debug!(
                    code,
                    min = Level::MIN_CODE,
                    max = Level::MAX_CODE,
                    "invalid level code, logger left unfiltered"
                );
                Level::NoLevel
            }
        };
        self
    }

    /// Replace what runs after a fatal event is written.
    pub fn on_fatal(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_fatal = Some(Box::new(hook));
        self
    }

    pub fn build(self) -> Logger<W> {
        Logger {
            writer: EventWriter::new(self.output),
            level: self.level,
            on_fatal: self.on_fatal.unwrap_or_else(|| Box::new(exit_process)),
        }
    }
}

fn exit_process() {
    std::process::exit(1)
}
