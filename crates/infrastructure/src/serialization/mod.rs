//! Serialization for report attachments, result files and suite documents.

mod json;

pub use json::{
    SerializationError, from_document, from_json, is_document, to_attachment_json, to_json_stable,
};
