//! Fields and the array-of-objects encoding.
//!
//! A field list is written as a JSON array in which every element is a
//! single-key object:
//!
//! ```text
//! "data":[{"foo":"bar"},{"n":999}]
//! ```
//!
//! Duplicate keys survive as separate elements, in caller order.

use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;

use crate::value::{LogObject, Object, Value};

/// Key under which the field array is written.
pub const FIELDS_KEY: &str = "data";

/// A single key/value pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: Value,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> From<(K, V)> for Field {
    fn from((key, value): (K, V)) -> Self {
        Field::new(key, value)
    }
}

impl LogObject for Field {
    fn log_object(&self, obj: &mut Object) {
        obj.insert(self.key.clone(), self.value.clone());
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, &self.value)?;
        map.end()
    }
}

/// Caller-owned, ordered list of fields for one event.
pub type Fields = Vec<Field>;

/// Borrowed view that serializes a field slice as the `data` array.
#[derive(Debug, Clone, Copy)]
pub struct FieldArray<'a>(pub &'a [Field]);

impl Serialize for FieldArray<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for field in self.0 {
            seq.serialize_element(field)?;
        }
        seq.end()
    }
}

/// Build a [`Fields`] list from `key => value` pairs.
///
/// ```
/// use torolog_core::fields;
///
/// let fields = fields!["user" => "ada", "attempts" => 3];
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        vec![$($crate::Field::new($key, $value)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(fields: &[Field]) -> String {
        serde_json::to_string(&FieldArray(fields)).unwrap()
    }

    #[test]
    fn test_empty_list_is_empty_array() {
        assert_eq!(encode(&[]), "[]");
    }

    #[test]
    fn test_single_key_objects_in_order() {
        let fields = crate::fields!["foo" => "bar", "n" => 999];
        assert_eq!(encode(&fields), r#"[{"foo":"bar"},{"n":999}]"#);
    }

    #[test]
    fn test_duplicate_keys_preserved() {
        let fields: Fields = vec![("k", 1).into(), ("k", 2).into(), ("j", 3).into()];
        assert_eq!(encode(&fields), r#"[{"k":1},{"k":2},{"j":3}]"#);
    }

    #[test]
    fn test_field_as_log_object() {
        let value = Value::object(&Field::new("inner", true));
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"inner":true}"#);
    }
}
