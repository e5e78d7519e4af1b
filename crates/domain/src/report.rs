//! Report attachments and test outcomes.

use serde::{Deserialize, Serialize};

/// Content kind of an attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentType {
    /// Pretty-printed JSON document.
    Json,
    /// Plain text.
    Text,
}

impl AttachmentType {
    /// MIME type recorded alongside the attachment.
    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Text => "text/plain",
        }
    }

    /// File extension used when the attachment is written to disk.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "txt",
        }
    }
}

/// A named piece of diagnostic content recorded against the running test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Display name, e.g. "Response Details".
    pub name: String,
    /// The content itself.
    pub content: String,
    /// How the content should be rendered.
    pub kind: AttachmentType,
}

impl Attachment {
    /// Creates a JSON attachment.
    #[must_use]
    pub fn json(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            kind: AttachmentType::Json,
        }
    }

    /// Creates a plain-text attachment.
    #[must_use]
    pub fn text(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            kind: AttachmentType::Text,
        }
    }
}

/// Final status of one test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    /// Every assertion held.
    Passed,
    /// An assertion failed.
    Failed,
    /// The test could not run to completion (transport error, missing schema).
    Broken,
    /// The test was not run.
    Skipped,
}

impl TestStatus {
    /// Returns true for outcomes that should fail a run.
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Failed | Self::Broken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_types_map_to_mime_and_extension() {
        assert_eq!(AttachmentType::Json.mime(), "application/json");
        assert_eq!(AttachmentType::Text.extension(), "txt");
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&TestStatus::Broken).unwrap_or_default();
        assert_eq!(json, "\"broken\"");
        assert!(TestStatus::Broken.is_failure());
        assert!(!TestStatus::Skipped.is_failure());
    }
}
