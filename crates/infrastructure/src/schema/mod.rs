//! JSON Schema documents, addressed by name.

mod registry;

pub use registry::{DEFAULT_SCHEMAS_DIR, SchemaRegistry};
