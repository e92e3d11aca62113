//! torolog engine
//!
//! Encodes leveled log events as one JSON object per line and writes them to
//! a caller-supplied sink. The `torolog` crate builds its typed facade on top
//! of this.
//!
//! ## Wire format
//!
//! ```text
//! {"level":"info","data":[{"foo":"bar"},{"n":999}],"message":"ready"}
//! ```
//!
//! ## Usage
//!
//! ```
//! use torolog_core::{fields, Event, EventWriter, Level};
//!
//! let writer = EventWriter::new(Vec::new());
//! let fields = fields!["foo" => "bar"];
//! writer.emit(&Event::new(Level::Info, "", &fields));
//!
//! let out = String::from_utf8(writer.into_inner()).unwrap();
//! assert_eq!(out, "{\"level\":\"info\",\"data\":[{\"foo\":\"bar\"}]}\n");
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod field;
pub mod level;
pub mod value;
pub mod writer;

// Re-exports
pub use config::LoggerConfig;
pub use error::{LogError, LogResult};
pub use event::Event;
pub use field::{Field, FieldArray, Fields, FIELDS_KEY};
pub use level::Level;
pub use value::{LogObject, Object, Value};
pub use writer::EventWriter;
