//! Reads suite files from disk.

use std::path::{Path, PathBuf};

use apiprobe_domain::testing::TestSuite;
use thiserror::Error;
use tokio::fs;
use tracing::debug;

use crate::serialization::{SerializationError, from_document, is_document};

/// Errors raised while loading suites.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// A suite file or directory could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A suite file is not a valid suite document.
    #[error("invalid suite {}: {source}", path.display())]
    Parse {
        /// Offending file.
        path: PathBuf,
        /// Parser error.
        source: SerializationError,
    },
}

/// Loads one suite from a `.json`, `.yaml` or `.yml` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub async fn load_suite(path: &Path) -> Result<TestSuite, SuiteError> {
    let text = fs::read_to_string(path).await.map_err(|source| SuiteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_document(path, &text).map_err(|source| SuiteError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads every suite file directly inside `dir`, ordered by file name.
/// Files with other extensions are ignored.
///
/// # Errors
///
/// Returns the first read or parse error.
pub async fn load_suites(dir: &Path) -> Result<Vec<TestSuite>, SuiteError> {
    let io_error = |source| SuiteError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    let mut entries = fs::read_dir(dir).await.map_err(io_error)?;
    while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
        let path = entry.path();
        if path.is_file() && is_document(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut suites = Vec::with_capacity(paths.len());
    for path in paths {
        let suite = load_suite(&path).await?;
        debug!(suite = %suite.name, cases = suite.cases.len(), path = %path.display(), "suite loaded");
        suites.push(suite);
    }
    Ok(suites)
}
