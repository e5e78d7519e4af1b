//! Type inspection over JSON values.
//!
//! Assertions that behave differently for objects, arrays and strings
//! dispatch on [`JsonShape`] instead of matching `serde_json::Value` ad hoc.

use serde_json::{Map, Value};

/// The structural kind of a JSON value, borrowed from the value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JsonShape<'a> {
    /// A JSON object.
    Mapping(&'a Map<String, Value>),
    /// A JSON array.
    Sequence(&'a [Value]),
    /// A JSON string.
    Text(&'a str),
    /// `null`, a boolean or a number.
    Other(&'a Value),
}

impl<'a> JsonShape<'a> {
    /// Classifies a value.
    #[must_use]
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Self::Mapping(map),
            Value::Array(items) => Self::Sequence(items),
            Value::String(text) => Self::Text(text),
            other => Self::Other(other),
        }
    }

    /// Whether the value counts as empty.
    ///
    /// Objects and arrays need at least one element, strings at least one
    /// non-whitespace character. Scalars are empty when falsy: `null`,
    /// `false` and zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Mapping(map) => map.is_empty(),
            Self::Sequence(items) => items.is_empty(),
            Self::Text(text) => text.trim().is_empty(),
            Self::Other(value) => !is_truthy(value),
        }
    }

    /// The keys of an object, in document order. Other shapes have none.
    #[must_use]
    pub fn keys(&self) -> Vec<&'a str> {
        match self {
            Self::Mapping(map) => map.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_values() {
        assert!(matches!(JsonShape::of(&json!({})), JsonShape::Mapping(_)));
        assert!(matches!(JsonShape::of(&json!([])), JsonShape::Sequence(_)));
        assert!(matches!(JsonShape::of(&json!("x")), JsonShape::Text("x")));
        assert!(matches!(JsonShape::of(&json!(3)), JsonShape::Other(_)));
    }

    #[test]
    fn emptiness_per_shape() {
        assert!(JsonShape::of(&json!({})).is_empty());
        assert!(JsonShape::of(&json!([])).is_empty());
        assert!(JsonShape::of(&json!(" \t\n")).is_empty());
        assert!(JsonShape::of(&json!(null)).is_empty());
        assert!(JsonShape::of(&json!(false)).is_empty());
        assert!(JsonShape::of(&json!(0)).is_empty());

        assert!(!JsonShape::of(&json!({"a": 1})).is_empty());
        assert!(!JsonShape::of(&json!([0])).is_empty());
        assert!(!JsonShape::of(&json!(" x ")).is_empty());
        assert!(!JsonShape::of(&json!(true)).is_empty());
        assert!(!JsonShape::of(&json!(0.5)).is_empty());
    }

    #[test]
    fn keys_keep_document_order_for_objects_only() {
        let value = json!({"name": "x", "id": 1});
        assert_eq!(JsonShape::of(&value).keys(), vec!["name", "id"]);
        assert!(JsonShape::of(&json!([1, 2])).keys().is_empty());
    }
}
