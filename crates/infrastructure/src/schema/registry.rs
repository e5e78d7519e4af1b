//! Schema lookup by name.

use std::path::{Path, PathBuf};

use jsonschema::Validator;
use serde_json::Value;
use tracing::debug;

use crate::error::{HarnessError, HarnessResult};

/// Default location of the schema documents, relative to the working directory.
pub const DEFAULT_SCHEMAS_DIR: &str = "schemas";

/// Maps schema names to `<root>/<name>.json` files.
///
/// Documents are read from disk on every lookup; nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRegistry {
    root: PathBuf,
}

impl SchemaRegistry {
    /// Creates a registry over the given directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory schema files are read from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file a schema name resolves to.
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }

    /// Reads and parses the schema document for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::SchemaNotFound`] if no file exists for the
    /// name (names that would leave the directory never resolve), or
    /// [`HarnessError::SchemaLoad`] if the file is unreadable or not JSON.
    pub fn load(&self, name: &str) -> HarnessResult<Value> {
        let path = self.path_for(name);
        if !is_plain_name(name) || !path.is_file() {
            return Err(HarnessError::SchemaNotFound {
                name: name.to_string(),
                path,
            });
        }

        debug!(schema = name, path = %path.display(), "loading schema");
        let text = std::fs::read_to_string(&path).map_err(|e| HarnessError::SchemaLoad {
            path: path.clone(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| HarnessError::SchemaLoad {
            path,
            message: e.to_string(),
        })
    }

    /// Loads `name` and compiles it with format validation enabled.
    ///
    /// # Errors
    ///
    /// Returns the [`load`](Self::load) errors, or
    /// [`HarnessError::InvalidSchema`] if the document is not a valid schema.
    pub fn compile(&self, name: &str) -> HarnessResult<Validator> {
        let schema = self.load(name)?;
        jsonschema::options()
            .should_validate_formats(true)
            .build(&schema)
            .map_err(|e| HarnessError::InvalidSchema {
                name: name.to_string(),
                message: e.to_string(),
            })
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEMAS_DIR)
    }
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\'])
}
