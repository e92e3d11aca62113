//! torolog
//!
//! A typed, leveled, structured logging facade. Every call writes one JSON
//! object per line to the sink the logger was built over:
//!
//! ```text
//! {"level":"info","data":[{"user":"ada"},{"attempts":3}],"message":"login"}
//! ```
//!
//! Fields are written as an array of single-key objects, in the order they
//! were given. Duplicate keys are kept.
//!
//! ## Quick Start
//!
//! ```
//! use torolog::{fields, Level, Logger};
//!
//! let log = Logger::with_level(Vec::new(), Level::Info);
//! log.debug("dropped", &[]);
//! log.info("login", &fields!["user" => "ada", "attempts" => 3]);
//!
//! let out = String::from_utf8(log.into_inner()).unwrap();
//! assert_eq!(
//!     out,
//!     "{\"level\":\"info\",\"data\":[{\"user\":\"ada\"},{\"attempts\":3}],\"message\":\"login\"}\n"
//! );
//! ```

pub mod logger;

// Re-exports
pub use logger::{Logger, LoggerBuilder};
pub use torolog_core::{
    fields, Field, Fields, LogError, LogObject, LoggerConfig, Level, Object, Value, FIELDS_KEY,
};
