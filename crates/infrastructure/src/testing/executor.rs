//! Runs declarative cases end to end: request, assertions, report.

use apiprobe_application::{ApiClient, ApplicationError, HttpClient, ReportSink};
use apiprobe_domain::report::{Attachment, TestStatus};
use apiprobe_domain::request::{RequestBody, RequestSpec};
use apiprobe_domain::testing::{CaseRequest, TestCase, TestSuite};
use tracing::{info, warn};

use super::TestRunner;
use crate::report::{TestCaseResult, TestReport};
use crate::serialization::to_attachment_json;

/// Name of the attachment holding every assertion outcome of a case.
pub const ASSERTION_RESULTS: &str = "Assertion Results";

/// Sends each case's request through an [`ApiClient`] and judges the
/// response with a [`TestRunner`].
///
/// A case whose request never gets a response, or whose schema cannot be
/// loaded, finishes [`TestStatus::Broken`]; a case with a failed assertion
/// finishes [`TestStatus::Failed`].
#[derive(Debug)]
pub struct SuiteExecutor<C> {
    client: ApiClient<C>,
    runner: TestRunner,
}

impl<C: HttpClient> SuiteExecutor<C> {
    /// Creates an executor.
    #[must_use]
    pub const fn new(client: ApiClient<C>, runner: TestRunner) -> Self {
        Self { client, runner }
    }

    /// Runs every case of `suite` in order.
    pub async fn run_suite(&self, suite: &TestSuite) -> Vec<TestCaseResult> {
        info!(suite = %suite.name, cases = suite.cases.len(), "running suite");
        let mut results = Vec::with_capacity(suite.cases.len());
        for case in &suite.cases {
            results.push(self.run_case(&suite.name, case).await);
        }
        results
    }

    /// Runs one case and returns its finished record.
    pub async fn run_case(&self, suite_name: &str, case: &TestCase) -> TestCaseResult {
        let report = TestReport::start(&case.name).with_suite(suite_name);

        let request = match self.build_request(&case.request) {
            Ok(request) => request,
            Err(e) => return broken(report, &e.to_string()),
        };
        report.attach(Attachment::json("Request", to_attachment_json(&case.request)));

        let response = match self.client.send(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(case = %case.name, error = %e, "request failed");
                return broken(report, &e.to_string());
            }
        };

        let results = match self.runner.run(case, &response, &report) {
            Ok(results) => results,
            Err(e) => {
                warn!(case = %case.name, error = %e, "case could not be evaluated");
                return broken(report, &e.to_string());
            }
        };
        report.attach(Attachment::json(ASSERTION_RESULTS, to_attachment_json(&results)));

        if results.all_passed() {
            info!(case = %case.name, assertions = results.total, "passed");
            report.finish(TestStatus::Passed, None)
        } else {
            let message = results.failure_messages().collect::<Vec<_>>().join("\n");
            info!(case = %case.name, failed = results.failed, "failed");
            report.finish(TestStatus::Failed, Some(message))
        }
    }

    fn build_request(&self, spec: &CaseRequest) -> Result<RequestSpec, ApplicationError> {
        let mut request = self.client.request(spec.method, &spec.path);
        for (key, value) in &spec.query {
            request = request.with_query(key.clone(), value.clone());
        }
        if let Some(body) = &spec.body {
            request = request.with_body(RequestBody::from_value(body)?);
        }
        Ok(request)
    }
}

fn broken(report: TestReport, message: &str) -> TestCaseResult {
    report.attach(Attachment::text("Error", message));
    report.finish(TestStatus::Broken, Some(message.to_string()))
}
