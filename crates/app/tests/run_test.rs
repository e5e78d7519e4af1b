//! End-to-end `run` against a local upstream.

#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use apiprobe::{RunArgs, RunSummary, run};
use apiprobe_infrastructure::HarnessConfig;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
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
  - name: delete user
    request:
      method: DELETE
      path: users/1
    assertions:
      - type: status_code
        expected: 200
";

const FAILING_SUITE: &str = r#"{
  "name": "posts",
  "cases": [
    {
      "name": "posts are listed",
      "request": {"path": "posts"},
      "assertions": [{"type": "status_code", "expected": 200}]
    }
  ]
}"#;

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
    Mock::given(method("DELETE"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    server
}

fn args(root: &Path, server: &MockServer) -> RunArgs {
    RunArgs {
        suites: root.join("suites"),
        base_url: Some(server.uri()),
        schemas: Some(PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../schemas"))),
        results: Some(root.join("results")),
        ..RunArgs::default()
    }
}

fn result_documents(dir: &Path) -> Vec<Value> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.to_string_lossy().ends_with("-result.json"))
        .map(|p| serde_json::from_str(&std::fs::read_to_string(p).unwrap()).unwrap())
        .collect()
}

#[tokio::test]
async fn passing_suite_writes_one_result_per_case() {
    let server = upstream().await;
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir(root.path().join("suites")).unwrap();
    std::fs::write(root.path().join("suites/users.yaml"), SUITE).unwrap();

    let results = root.path().join("results");
    std::fs::create_dir(&results).unwrap();
    std::fs::write(results.join("old-result.json"), "{}").unwrap();

    let summary = run(&args(root.path(), &server), HarnessConfig::default())
        .await
        .unwrap();

    assert_eq!(
        summary,
        RunSummary {
            passed: 2,
            ..RunSummary::default()
        }
    );
    assert!(summary.is_success());

    let documents = result_documents(&results);
    assert_eq!(documents.len(), 2);
    assert!(documents.iter().all(|d| d["status"] == "passed"));
    assert!(!results.join("old-result.json").exists());
}

#[tokio::test]
async fn failing_case_makes_the_run_unsuccessful() {
    let server = upstream().await;
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir(root.path().join("suites")).unwrap();
    std::fs::write(root.path().join("suites/users.yaml"), SUITE).unwrap();
    std::fs::write(root.path().join("suites/posts.json"), FAILING_SUITE).unwrap();

    let summary = run(&args(root.path(), &server), HarnessConfig::default())
        .await
        .unwrap();

    assert_eq!(summary.passed, 2);
    assert_eq!(summary.failed, 1);
    assert!(!summary.is_success());
}

#[tokio::test]
async fn missing_suites_directory_is_an_error() {
    let server = upstream().await;
    let root = tempfile::tempdir().unwrap();

    let err = run(&args(root.path(), &server), HarnessConfig::default())
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("loading suites"));
}
