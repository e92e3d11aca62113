//! Typed field values and their JSON projection.
//!
//! Every [`Value`] serializes without failing: non-finite floats become
//! strings and values that cannot be projected fall back to their error text.
//!
//! Errors are opaque here. An error stored as a field value encodes as `{}`;
//! log `err.to_string()` as a string field to keep its message.

use std::time::{Duration, SystemTime};

use base64::Engine as _;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Whole floats below this magnitude print in fixed-point integer form.
const MAX_FIXED_FLOAT: f64 = 1e21;

/// A typed value attached to a field.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Str(String),
    /// Encoded as standard base64.
    Bytes(Vec<u8>),
    Bool(bool),
    Int(i64),
    Uint(u64),
    F32(f32),
    F64(f64),
    /// Encoded as integer nanoseconds.
    Duration(Duration),
    /// Encoded as RFC 3339.
    Time(DateTime<Utc>),
    /// Captured error message. Always encodes as `{}`.
    Error(String),
    Object(Object),
    Json(serde_json::Value),
}

impl Value {
    /// Capture an error's message.
    pub fn error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        Value::Error(err.to_string())
    }

    /// Render a value through its [`LogObject`] implementation.
    pub fn object<T: LogObject + ?Sized>(value: &T) -> Self {
        let mut obj = Object::new();
        value.log_object(&mut obj);
        Value::Object(obj)
    }

    /// Project any serde type.
    ///
    /// Projection failures become a string holding the serializer's error.
    pub fn serialized<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(json) => Value::Json(json),
            Err(e) => {
                tracing::debug!(error = %e, "value could not be projected to JSON");
                Value::Str(e.to_string())
            }
        }
    }
}

/// Capability for values that render themselves as a nested object.
pub trait LogObject {
    fn log_object(&self, obj: &mut Object);
}

impl<T: LogObject + ?Sized> LogObject for &T {
    fn log_object(&self, obj: &mut Object) {
        (**self).log_object(obj)
    }
}

/// Ordered key/value object. Keys are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    entries: Vec<(String, Value)>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key/value pair.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Builder form of [`Object::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Bytes(b) => {
                serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(b))
            }
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Uint(n) => serializer.serialize_u64(*n),
            Value::F32(f) => serialize_f32(*f, serializer),
            Value::F64(f) => serialize_f64(*f, serializer),
            Value::Duration(d) => {
                serializer.serialize_u64(u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
            }
            Value::Time(t) => serializer.serialize_str(&format_time(t)),
            Value::Error(_) => serializer.serialize_map(Some(0))?.end(),
            Value::Object(obj) => obj.serialize(serializer),
            Value::Json(json) => json.serialize(serializer),
        }
    }
}

fn non_finite(f: f64) -> &'static str {
    if f.is_nan() {
        "NaN"
    } else if f.is_sign_positive() {
        "+Inf"
    } else {
        "-Inf"
    }
}

/// Integer form of a whole float, read from its shortest decimal digits so
/// `1e20` prints as `100000000000000000000`. `-0` collapses to `0`.
fn fixed_integer(f: f64, shortest: &str) -> Option<i128> {
    if f.fract() == 0.0 && f.abs() < MAX_FIXED_FLOAT {
        shortest.parse().ok()
    } else {
        None
    }
}

fn serialize_f64<S: Serializer>(f: f64, serializer: S) -> Result<S::Ok, S::Error> {
    if !f.is_finite() {
        return serializer.serialize_str(non_finite(f));
    }
    match fixed_integer(f, &f.to_string()) {
        Some(n) => serializer.serialize_i128(n),
        None => serializer.serialize_f64(f),
    }
}

fn serialize_f32<S: Serializer>(f: f32, serializer: S) -> Result<S::Ok, S::Error> {
    let wide = f as f64;
    if !wide.is_finite() {
        return serializer.serialize_str(non_finite(wide));
    }
    // f32 keeps its own shortest digits (0.1, not 0.10000000149011612)
    match fixed_integer(wide, &f.to_string()) {
        Some(n) => serializer.serialize_i128(n),
        None => serializer.serialize_f32(f),
    }
}

/// RFC 3339 in UTC with a `Z` suffix. Fractional seconds keep only their
/// significant digits (`.25`, not `.250`) and vanish when zero.
pub fn format_time(t: &DateTime<Utc>) -> String {
    let full = t.to_rfc3339_opts(SecondsFormat::Nanos, true);
    let base = full.strip_suffix('Z').unwrap_or(&full);
    let trimmed = base.trim_end_matches('0').trim_end_matches('.');
    format!("{}Z", trimmed)
}

macro_rules! impl_from_int {
    ($variant:ident as $wide:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::$variant(n as $wide)
                }
            }
        )*
    };
}

impl_from_int!(Int as i64: i8, i16, i32, i64, isize);
impl_from_int!(Uint as u64: u8, u16, u32, u64, usize);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Value {
    fn from(b: &[u8; N]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::F32(f)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::F64(f)
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Value::Duration(d)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Time(t)
    }
}

impl From<SystemTime> for Value {
    fn from(t: SystemTime) -> Self {
        Value::Time(t.into())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::Json(json)
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(obj)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn json(value: impl Into<Value>) -> String {
        serde_json::to_string(&value.into()).unwrap()
    }

    struct Point {
        x: i32,
        y: i32,
    }

    impl LogObject for Point {
        fn log_object(&self, obj: &mut Object) {
            obj.insert("x", self.x).insert("y", self.y);
        }
    }

    #[test]
    fn test_scalar_projection() {
        assert_eq!(json(Value::Null), "null");
        assert_eq!(json("foo"), "\"foo\"");
        assert_eq!(json(b"bar"), "\"YmFy\"");
        assert_eq!(json(true), "true");
        assert_eq!(json(-7i8), "-7");
        assert_eq!(json(u64::MAX), "18446744073709551615");
        assert_eq!(json(i64::MIN), "-9223372036854775808");
    }

    #[test]
    fn test_float_projection() {
        assert_eq!(json(11f32), "11");
        assert_eq!(json(12f64), "12");
        assert_eq!(json(0.1f32), "0.1");
        assert_eq!(json(2.5f64), "2.5");
        assert_eq!(json(9_007_199_254_740_992f64), "9007199254740992");
        assert_eq!(json(1e20f64), "100000000000000000000");
        assert_eq!(json(-3f64), "-3");
        assert_eq!(json(-0.0f64), "0");
        assert_eq!(json(f64::NAN), "\"NaN\"");
        assert_eq!(json(f64::INFINITY), "\"+Inf\"");
        assert_eq!(json(f32::NEG_INFINITY), "\"-Inf\"");
    }

    #[test]
    fn test_duration_is_nanoseconds() {
        assert_eq!(json(Duration::from_secs(1)), "1000000000");
        assert_eq!(json(Duration::MAX), u64::MAX.to_string());
    }

    #[test]
    fn test_time_projection() {
        let zero = Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(json(zero), "\"0001-01-01T00:00:00Z\"");

        let t = Utc.with_ymd_and_hms(2024, 3, 9, 12, 30, 5).unwrap()
            + chrono::Duration::milliseconds(250);
        assert_eq!(json(t), "\"2024-03-09T12:30:05.25Z\"");

        let nanos = Utc.with_ymd_and_hms(2024, 3, 9, 12, 30, 5).unwrap()
            + chrono::Duration::nanoseconds(1_000);
        assert_eq!(json(nanos), "\"2024-03-09T12:30:05.000001Z\"");

        let whole = Utc.with_ymd_and_hms(2020, 10, 20, 0, 0, 10).unwrap();
        assert_eq!(json(whole), "\"2020-10-20T00:00:10Z\"");
    }

    #[test]
    fn test_error_projection() {
        let empty = std::io::Error::new(std::io::ErrorKind::Other, "");
        assert_eq!(json(Value::error(&empty)), "{}");

        // Opaque like any error without a structured form
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert_eq!(json(Value::error(&err)), "{}");
        assert_eq!(Value::error(&err), Value::Error("disk full".to_string()));
    }

    #[test]
    fn test_object_capability() {
        let value = Value::object(&Point { x: 1, y: -2 });
        assert_eq!(json(value), r#"{"x":1,"y":-2}"#);
    }

    #[test]
    fn test_object_keeps_insertion_order_and_duplicates() {
        let obj = Object::new().with("b", 1).with("a", 2).with("b", 3);
        assert_eq!(obj.len(), 3);
        assert_eq!(json(obj), r#"{"b":1,"a":2,"b":3}"#);
    }

    #[test]
    fn test_option_and_serialized() {
        assert_eq!(json(None::<i32>), "null");
        assert_eq!(json(Some("x")), "\"x\"");

        #[derive(Serialize)]
        struct Peer {
            id: u32,
        }
        assert_eq!(json(Value::serialized(&Peer { id: 9 })), r#"{"id":9}"#);
    }
}
