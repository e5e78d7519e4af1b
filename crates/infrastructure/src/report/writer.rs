//! Writes finished cases to a results directory in the Allure layout.
//!
//! Every case becomes `<uuid>-result.json`; each attachment is stored next
//! to it as `<uuid>-attachment.<ext>` and referenced by file name.

use std::path::{Path, PathBuf};

use apiprobe_domain::report::TestStatus;
use serde::Serialize;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use super::TestCaseResult;
use crate::serialization::{SerializationError, to_json_stable};

/// Default results directory, relative to the working directory.
pub const DEFAULT_RESULTS_DIR: &str = "reports/allure-results";

/// Errors raised while writing results.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A file or directory operation failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A result could not be encoded.
    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

impl ReportError {
    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result file as the Allure CLI reads it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AllureResult<'a> {
    uuid: Uuid,
    name: &'a str,
    full_name: String,
    status: TestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_details: Option<StatusDetails<'a>>,
    stage: &'static str,
    start: i64,
    stop: i64,
    attachments: Vec<AllureAttachment<'a>>,
    labels: Vec<Label<'a>>,
}

#[derive(Debug, Serialize)]
struct StatusDetails<'a> {
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct AllureAttachment<'a> {
    name: &'a str,
    source: String,
    #[serde(rename = "type")]
    mime: &'static str,
}

#[derive(Debug, Serialize)]
struct Label<'a> {
    name: &'static str,
    value: &'a str,
}

/// Writes [`TestCaseResult`]s into one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsWriter {
    dir: PathBuf,
}

impl ResultsWriter {
    /// Creates a writer for `dir`. Nothing touches the disk until
    /// [`prepare`](Self::prepare) or [`write`](Self::write).
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The results directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the directory and removes files left by a previous run.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or cleaned.
    pub async fn prepare(&self) -> Result<(), ReportError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(ReportError::io(&self.dir))?;

        let mut entries = fs::read_dir(&self.dir)
            .await
            .map_err(ReportError::io(&self.dir))?;
        let mut removed = 0_usize;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(ReportError::io(&self.dir))?
        {
            let path = entry.path();
            if path.is_file() {
                fs::remove_file(&path).await.map_err(ReportError::io(&path))?;
                removed += 1;
            }
        }
        debug!(dir = %self.dir.display(), removed, "results directory prepared");
        Ok(())
    }

    /// Writes one result and its attachments. Returns the result file path.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be written.
    pub async fn write(&self, result: &TestCaseResult) -> Result<PathBuf, ReportError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(ReportError::io(&self.dir))?;

        let mut attachments = Vec::with_capacity(result.attachments.len());
        for attachment in &result.attachments {
            let source = format!(
                "{}-attachment.{}",
                Uuid::now_v7(),
                attachment.kind.extension()
            );
            let path = self.dir.join(&source);
            fs::write(&path, attachment.content.as_bytes())
                .await
                .map_err(ReportError::io(&path))?;
            attachments.push(AllureAttachment {
                name: &attachment.name,
                source,
                mime: attachment.kind.mime(),
            });
        }

        let mut labels = Vec::new();
        if let Some(suite) = &result.suite {
            labels.push(Label {
                name: "suite",
                value: suite,
            });
        }

        let document = AllureResult {
            uuid: result.uuid,
            name: &result.name,
            full_name: result
                .suite
                .as_ref()
                .map_or_else(|| result.name.clone(), |suite| format!("{suite}.{}", result.name)),
            status: result.status,
            status_details: result
                .message
                .as_deref()
                .map(|message| StatusDetails { message }),
            stage: "finished",
            start: result.start,
            stop: result.stop,
            attachments,
            labels,
        };

        let path = self.dir.join(format!("{}-result.json", result.uuid));
        let json = to_json_stable(&document)?;
        fs::write(&path, json).await.map_err(ReportError::io(&path))?;
        info!(case = %result.name, status = ?result.status, path = %path.display(), "result written");
        Ok(path)
    }
}

impl Default for ResultsWriter {
    fn default() -> Self {
        Self::new(DEFAULT_RESULTS_DIR)
    }
}
