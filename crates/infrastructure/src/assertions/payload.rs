//! Checks on decoded JSON payloads.

use apiprobe_domain::{AssertionFailure, AssertionOutcome, JsonShape};
use serde_json::Value;

/// Asserts `data` is an object holding every key in `required_keys`.
///
/// Anything that is not an object has no keys, so every required key is
/// reported missing.
///
/// # Errors
///
/// Returns an [`AssertionFailure`] listing the missing keys (in the order
/// they were asked for) and the keys that are present.
pub fn assert_contains_keys<K: AsRef<str>>(data: &Value, required_keys: &[K]) -> AssertionOutcome {
    let available = JsonShape::of(data).keys();
    let missing: Vec<&str> = required_keys
        .iter()
        .map(AsRef::as_ref)
        .filter(|key| !available.contains(key))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }
    Err(AssertionFailure::new(format!(
        "Missing required keys: {missing:?}. Available keys: {available:?}"
    )))
}

/// Asserts `data` is not empty.
///
/// Objects and arrays need at least one entry, strings need a non-whitespace
/// character, and scalars must not be `null`, `false` or zero.
///
/// # Errors
///
/// Returns an [`AssertionFailure`] naming the kind of value that was empty.
pub fn assert_not_empty(data: &Value) -> AssertionOutcome {
    let shape = JsonShape::of(data);
    if !shape.is_empty() {
        return Ok(());
    }
    let message = match shape {
        JsonShape::Mapping(_) => "Dictionary is empty".to_string(),
        JsonShape::Sequence(_) => "List is empty".to_string(),
        JsonShape::Text(_) => "String is empty or whitespace".to_string(),
        JsonShape::Other(value) => format!("Data is empty: {value}"),
    };
    Err(AssertionFailure::new(message))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn all_keys_present_passes() {
        let data = json!({"id": 1, "name": "Leanne", "email": "a@b.co"});
        assert!(assert_contains_keys(&data, &["id", "email"]).is_ok());
        assert!(assert_contains_keys::<&str>(&data, &[]).is_ok());
    }

    #[test]
    fn missing_keys_are_listed_with_available_ones() {
        let failure = assert_contains_keys(&json!({"a": 1, "b": 2}), &["a", "c"]).unwrap_err();
        assert_eq!(
            failure.message(),
            r#"Missing required keys: ["c"]. Available keys: ["a", "b"]"#
        );
    }

    #[test]
    fn non_object_has_no_keys() {
        let failure = assert_contains_keys(&json!([1, 2]), &["id"]).unwrap_err();
        assert_eq!(failure.message(), r#"Missing required keys: ["id"]. Available keys: []"#);
    }

    #[test]
    fn owned_key_lists_are_accepted() {
        let keys = vec!["id".to_string()];
        assert!(assert_contains_keys(&json!({"id": 3}), &keys).is_ok());
    }

    #[test]
    fn empty_containers_fail_with_kind_specific_messages() {
        assert_eq!(assert_not_empty(&json!({})).unwrap_err().message(), "Dictionary is empty");
        assert_eq!(assert_not_empty(&json!([])).unwrap_err().message(), "List is empty");
        assert_eq!(
            assert_not_empty(&json!("   ")).unwrap_err().message(),
            "String is empty or whitespace"
        );
        assert_eq!(assert_not_empty(&Value::Null).unwrap_err().message(), "Data is empty: null");
    }

    #[test]
    fn populated_values_pass() {
        assert!(assert_not_empty(&json!({"id": 1})).is_ok());
        assert!(assert_not_empty(&json!([0])).is_ok());
        assert!(assert_not_empty(&json!(" x ")).is_ok());
        assert!(assert_not_empty(&json!(42)).is_ok());
    }
}
