//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the harness core and the outside
//! world: the network and the test report.

mod http_client;
mod report_sink;

pub use http_client::{HttpClient, HttpClientError};
pub use report_sink::ReportSink;
