//! apiprobe domain - core types
//!
//! This crate defines the model of the API test harness: requests,
//! responses, assertions and their failures, report attachments and the
//! fixed test payloads. All types here are pure Rust with no I/O.

pub mod error;
pub mod failure;
pub mod fixtures;
pub mod report;
pub mod request;
pub mod response;
pub mod shape;
pub mod testing;

pub use error::{DomainError, DomainResult};
pub use failure::{AssertionFailure, AssertionOutcome};
pub use report::{Attachment, AttachmentType, TestStatus};
pub use request::{HttpMethod, RequestBody, RequestSpec};
pub use response::ResponseSpec;
pub use shape::JsonShape;
pub use testing::{
    Assertion, AssertionResult, CaseRequest, CaseResults, ComparisonOperator, StatusExpectation,
    TestCase, TestSuite,
};
