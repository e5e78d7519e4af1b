//! Harness error types

use std::path::PathBuf;

use apiprobe_domain::AssertionFailure;
use thiserror::Error;

/// Errors raised by the assertion library and schema validation.
///
/// Only [`HarnessError::Assertion`] means the data under test was wrong.
/// The schema variants point at a broken harness (missing or malformed
/// schema file) and must not be read as a data mismatch.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// An expectation about the response or payload did not hold.
    #[error(transparent)]
    Assertion(#[from] AssertionFailure),

    /// No schema file exists for the requested name.
    #[error("Schema file not found: {}", path.display())]
    SchemaNotFound {
        /// Requested schema name.
        name: String,
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The schema file exists but could not be read or is not JSON.
    #[error("Failed to load schema {}: {message}", path.display())]
    SchemaLoad {
        /// Path of the schema file.
        path: PathBuf,
        /// Underlying error text.
        message: String,
    },

    /// The schema document is not a valid JSON Schema.
    #[error("Invalid schema {name}: {message}")]
    InvalidSchema {
        /// Schema name.
        name: String,
        /// Compiler error text.
        message: String,
    },
}

impl HarnessError {
    /// Returns the assertion failure, if this is one.
    #[must_use]
    pub const fn as_assertion(&self) -> Option<&AssertionFailure> {
        match self {
            Self::Assertion(failure) => Some(failure),
            _ => None,
        }
    }

    /// Returns true when the error points at the harness rather than the data.
    #[must_use]
    pub const fn is_harness_fault(&self) -> bool {
        !matches!(self, Self::Assertion(_))
    }
}

/// Result type alias for harness operations.
pub type HarnessResult<T> = Result<T, HarnessError>;
