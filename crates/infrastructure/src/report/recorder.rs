//! In-memory recording of one test case.

use apiprobe_application::ReportSink;
use apiprobe_domain::report::{Attachment, TestStatus};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Collects attachments while a test case runs.
///
/// Shared by reference with the assertions; interior mutability lets every
/// check attach through `&self`.
#[derive(Debug)]
pub struct TestReport {
    name: String,
    suite: Option<String>,
    started: DateTime<Utc>,
    attachments: Mutex<Vec<Attachment>>,
}

impl TestReport {
    /// Starts recording a case named `name`, timestamped now.
    #[must_use]
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            suite: None,
            started: Utc::now(),
            attachments: Mutex::new(Vec::new()),
        }
    }

    /// Labels the case with the suite it belongs to (builder pattern).
    #[must_use]
    pub fn with_suite(mut self, suite: impl Into<String>) -> Self {
        self.suite = Some(suite.into());
        self
    }

    /// The case name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Snapshot of the attachments recorded so far, in order.
    #[must_use]
    pub fn attachments(&self) -> Vec<Attachment> {
        self.attachments.lock().clone()
    }

    /// The first attachment with the given name.
    #[must_use]
    pub fn attachment(&self, name: &str) -> Option<Attachment> {
        self.attachments.lock().iter().find(|a| a.name == name).cloned()
    }

    /// Closes the record with its final status.
    #[must_use]
    pub fn finish(self, status: TestStatus, message: Option<String>) -> TestCaseResult {
        let stopped = Utc::now();
        TestCaseResult {
            uuid: Uuid::now_v7(),
            name: self.name,
            suite: self.suite,
            status,
            message,
            start: self.started.timestamp_millis(),
            stop: stopped.timestamp_millis(),
            attachments: self.attachments.into_inner(),
        }
    }
}

impl ReportSink for TestReport {
    fn attach(&self, attachment: Attachment) {
        debug!(case = %self.name, attachment = %attachment.name, "attaching");
        self.attachments.lock().push(attachment);
    }
}

/// A sink that drops everything. For running checks outside a report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReport;

impl ReportSink for NullReport {
    fn attach(&self, _attachment: Attachment) {}
}

/// The finished record of one test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseResult {
    /// Unique id, also the prefix of the result file.
    pub uuid: Uuid,
    /// Case name.
    pub name: String,
    /// Owning suite, if any.
    pub suite: Option<String>,
    /// Final status.
    pub status: TestStatus,
    /// Failure or error text.
    pub message: Option<String>,
    /// Start time, epoch milliseconds.
    pub start: i64,
    /// Stop time, epoch milliseconds.
    pub stop: i64,
    /// Attachments in the order they were recorded.
    pub attachments: Vec<Attachment>,
}

impl TestCaseResult {
    /// Wall-clock duration in milliseconds.
    #[must_use]
    pub const fn duration_ms(&self) -> i64 {
        self.stop - self.start
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn attachments_are_kept_in_order() {
        let report = TestReport::start("get user").with_suite("users");
        report.attach(Attachment::text("first", "1"));
        report.attach(Attachment::json("second", "{}"));

        let names: Vec<_> = report.attachments().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(report.attachment("second").unwrap().content, "{}");
    }

    #[test]
    fn finish_carries_status_and_timing() {
        let report = TestReport::start("get user").with_suite("users");
        report.attach(Attachment::text("note", "hello"));
        let result = report.finish(TestStatus::Failed, Some("boom".to_string()));

        assert_eq!(result.name, "get user");
        assert_eq!(result.suite.as_deref(), Some("users"));
        assert_eq!(result.status, TestStatus::Failed);
        assert_eq!(result.message.as_deref(), Some("boom"));
        assert!(result.duration_ms() >= 0);
        assert_eq!(result.attachments.len(), 1);
    }

    #[test]
    fn null_report_discards() {
        NullReport.attach(Attachment::text("ignored", ""));
    }
}
