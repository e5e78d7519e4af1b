//! Results directory layout.

#![allow(clippy::unwrap_used)]

use apiprobe_application::ReportSink;
use apiprobe_domain::report::{Attachment, TestStatus};
use apiprobe_infrastructure::{ResultsWriter, TestReport};
use pretty_assertions::assert_eq;
use serde_json::Value;

fn files(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn prepare_creates_and_cleans_the_directory() {
    let root = tempfile::tempdir().unwrap();
    let dir = root.path().join("allure-results");
    let writer = ResultsWriter::new(&dir);

    writer.prepare().await.unwrap();
    assert!(dir.is_dir());

    std::fs::write(dir.join("stale-result.json"), "{}").unwrap();
    writer.prepare().await.unwrap();
    assert!(files(&dir).is_empty());
}

#[tokio::test]
async fn result_and_attachments_are_written_and_linked() {
    let root = tempfile::tempdir().unwrap();
    let writer = ResultsWriter::new(root.path());

    let report = TestReport::start("get user").with_suite("users");
    report.attach(Attachment::json("Response Details", r#"{"status_code": 404}"#));
    report.attach(Attachment::text("Error", "boom"));
    let result = report.finish(TestStatus::Failed, Some("Expected status code 200, but got 404".into()));

    let path = writer.write(&result).await.unwrap();
    assert_eq!(
        path.file_name().unwrap().to_string_lossy(),
        format!("{}-result.json", result.uuid)
    );

    let names = files(root.path());
    assert_eq!(names.len(), 3);
    assert_eq!(names.iter().filter(|n| n.ends_with("-attachment.json")).count(), 1);
    assert_eq!(names.iter().filter(|n| n.ends_with("-attachment.txt")).count(), 1);

    let document: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(document["name"], "get user");
    assert_eq!(document["fullName"], "users.get user");
    assert_eq!(document["status"], "failed");
    assert_eq!(document["stage"], "finished");
    assert_eq!(document["statusDetails"]["message"], "Expected status code 200, but got 404");
    assert_eq!(document["labels"][0]["value"], "users");

    let attachments = document["attachments"].as_array().unwrap();
    assert_eq!(attachments[0]["name"], "Response Details");
    assert_eq!(attachments[0]["type"], "application/json");
    let source = attachments[0]["source"].as_str().unwrap();
    assert_eq!(
        std::fs::read_to_string(root.path().join(source)).unwrap(),
        r#"{"status_code": 404}"#
    );
}

#[tokio::test]
async fn passed_result_has_no_status_details() {
    let root = tempfile::tempdir().unwrap();
    let writer = ResultsWriter::new(root.path());

    let result = TestReport::start("list users").finish(TestStatus::Passed, None);
    let path = writer.write(&result).await.unwrap();

    let document: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(document["status"], "passed");
    assert!(document.get("statusDetails").is_none());
    assert_eq!(document["fullName"], "list users");
}
