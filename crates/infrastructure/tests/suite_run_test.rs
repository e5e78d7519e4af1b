//! Declarative suites executed against a local upstream.

#![allow(clippy::unwrap_used)]

use apiprobe_application::ApiClient;
use apiprobe_domain::report::TestStatus;
use apiprobe_domain::testing::TestSuite;
use apiprobe_infrastructure::testing::ASSERTION_RESULTS;
use apiprobe_infrastructure::{
    ReqwestHttpClient, SchemaRegistry, SuiteExecutor, TestRunner, from_document,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SUITE: &str = r"
name: users
cases:
  - name: get user
    request:
      path: users/1
    assertions:
      - type: status_code
        expected: 200
      - type: json_schema
        schema: user
  - name: wrong status
    request:
      path: users/999999
    assertions:
      - type: status_code
        expected: 200
  - name: unknown schema
    request:
      path: users/1
    assertions:
      - type: json_schema
        schema: comment
";

fn executor(server: &MockServer) -> SuiteExecutor<ReqwestHttpClient> {
    executor_for(server.uri())
}

fn executor_for(base_url: String) -> SuiteExecutor<ReqwestHttpClient> {
    let client = ApiClient::new(base_url, ReqwestHttpClient::new().unwrap());
    let runner = TestRunner::new(SchemaRegistry::new(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../schemas"
    )));
    SuiteExecutor::new(client, runner)
}

async fn upstream() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/999999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({})))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn cases_finish_passed_failed_or_broken() {
    let server = upstream().await;
    let suite: TestSuite = from_document(std::path::Path::new("users.yaml"), SUITE).unwrap();

    let results = executor(&server).run_suite(&suite).await;
    let statuses: Vec<_> = results.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![TestStatus::Passed, TestStatus::Failed, TestStatus::Broken]
    );

    assert!(results[0].attachments.iter().any(|a| a.name == ASSERTION_RESULTS));
    assert!(
        results[1]
            .message
            .as_deref()
            .unwrap()
            .starts_with("Expected status code 200, but got 404")
    );
    assert!(
        results[2]
            .message
            .as_deref()
            .unwrap()
            .starts_with("Schema file not found: ")
    );
    assert!(results.iter().all(|r| r.suite.as_deref() == Some("users")));
}

#[tokio::test]
async fn unreachable_upstream_breaks_the_case() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let executor = executor_for(format!("http://127.0.0.1:{port}"));

    let suite: TestSuite = from_document(std::path::Path::new("users.yaml"), SUITE).unwrap();
    let result = executor.run_case(&suite.name, &suite.cases[0]).await;
    assert_eq!(result.status, TestStatus::Broken);
    assert!(
        result
            .message
            .as_deref()
            .unwrap()
            .contains("connection refused by 127.0.0.1")
    );
}
