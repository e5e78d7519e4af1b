//! Serialization helpers for attachments, result files and suite documents.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// YAML deserialization failed.
    #[error("YAML deserialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The file extension names no known document format.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(String),
}

/// Serializes a value to pretty JSON with 2-space indentation.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize + ?Sized>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Serializes a value for an attachment, falling back to its debug form if
/// JSON encoding fails so the diagnostic is never lost.
#[must_use]
pub fn to_attachment_json<T: Serialize + std::fmt::Debug + ?Sized>(value: &T) -> String {
    to_json_stable(value).unwrap_or_else(|_| format!("{value:?}"))
}

/// Deserializes JSON from a string.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, SerializationError> {
    serde_json::from_str(json).map_err(SerializationError::Deserialize)
}

/// Deserializes a JSON or YAML document, chosen by the file extension.
///
/// # Errors
///
/// Returns an error for an unknown extension or an invalid document.
pub fn from_document<T: DeserializeOwned>(path: &Path, text: &str) -> Result<T, SerializationError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => from_json(text),
        Some("yaml" | "yml") => Ok(serde_yaml::from_str(text)?),
        other => Err(SerializationError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

/// Returns true for file names [`from_document`] can read.
#[must_use]
pub fn is_document(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("json" | "yaml" | "yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn stable_json_uses_two_space_indent() {
        let json = to_json_stable(&json!({"key": "value"})).expect("serialization should work");
        assert_eq!(json, "{\n  \"key\": \"value\"\n}");
    }

    #[test]
    fn yaml_and_json_documents_parse_alike() {
        let from_yaml: Value =
            from_document(Path::new("suite.yaml"), "name: users\ncases: []\n").expect("yaml parses");
        let from_json: Value =
            from_document(Path::new("suite.json"), r#"{"name": "users", "cases": []}"#).expect("json parses");
        assert_eq!(from_yaml, from_json);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let result: Result<Value, _> = from_document(Path::new("suite.toml"), "");
        assert!(matches!(result, Err(SerializationError::UnsupportedFormat(ext)) if ext == "toml"));
        assert!(!is_document(Path::new("README.md")));
    }
}
