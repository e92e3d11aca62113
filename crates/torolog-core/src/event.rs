//! The wire record for one log event.
//!
//! Keys are written in a fixed order: `level`, `data`, `error`, `message`.
//! `level` is omitted for level-less events, `error` when no error was
//! supplied and `message` when it is empty. `data` is always present.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::error::LogResult;
use crate::field::{Field, FieldArray, FIELDS_KEY};
use crate::level::Level;

pub const LEVEL_KEY: &str = "level";
pub const ERROR_KEY: &str = "error";
pub const MESSAGE_KEY: &str = "message";

/// A single event, borrowed from the caller for the duration of the emit.
#[derive(Debug, Clone)]
pub struct Event<'a> {
    level: Level,
    message: &'a str,
    error: Option<String>,
    fields: &'a [Field],
}

impl<'a> Event<'a> {
    /// Create an event. `Level::NoLevel` produces an event without a `level` key.
    pub fn new(level: Level, message: &'a str, fields: &'a [Field]) -> Self {
        Self {
            level,
            message,
            error: None,
            fields,
        }
    }

    /// Attach an error; its `Display` text becomes the `error` value.
    pub fn with_error(mut self, err: Option<&dyn std::error::Error>) -> Self {
        self.error = err.map(|e| e.to_string());
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Encode as a single JSON line including the trailing newline.
    pub fn to_json_line(&self) -> LogResult<Vec<u8>> {
        let mut buf = serde_json::to_vec(self)?;
        buf.push(b'\n');
        Ok(buf)
    }
}

impl Serialize for Event<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if self.level != Level::NoLevel {
            map.serialize_entry(LEVEL_KEY, &self.level)?;
        }
        map.serialize_entry(FIELDS_KEY, &FieldArray(self.fields))?;
        if let Some(err) = &self.error {
            map.serialize_entry(ERROR_KEY, err)?;
        }
        if !self.message.is_empty() {
            map.serialize_entry(MESSAGE_KEY, self.message)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;

    fn line(event: &Event<'_>) -> String {
        String::from_utf8(event.to_json_line().unwrap()).unwrap()
    }

    #[test]
    fn test_minimal_event() {
        let event = Event::new(Level::Info, "", &[]);
        assert_eq!(line(&event), "{\"level\":\"info\",\"data\":[]}\n");
    }

    #[test]
    fn test_level_less_event_has_no_level_key() {
        let fields = fields!["a" => 1];
        let event = Event::new(Level::NoLevel, "hello", &fields);
        assert_eq!(line(&event), "{\"data\":[{\"a\":1}],\"message\":\"hello\"}\n");
    }

    #[test]
    fn test_key_order_with_error_and_message() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let event = Event::new(Level::Error, "lookup failed", &[]).with_error(Some(&err));
        assert_eq!(
            line(&event),
            "{\"level\":\"error\",\"data\":[],\"error\":\"missing\",\"message\":\"lookup failed\"}\n"
        );
    }

    #[test]
    fn test_empty_error_message_is_still_written() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "");
        let event = Event::new(Level::Trace, "", &[]).with_error(Some(&err));
        assert_eq!(line(&event), "{\"level\":\"trace\",\"data\":[],\"error\":\"\"}\n");
    }

    #[test]
    fn test_absent_error_is_omitted() {
        let event = Event::new(Level::Warn, "", &[]).with_error(None);
        assert!(!line(&event).contains(ERROR_KEY));
    }
}
