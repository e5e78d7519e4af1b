//! apiprobe application - ports and client wrappers
//!
//! This crate defines:
//! - Port traits for the network and the test report
//! - Client wrappers that map API endpoints onto requests
//! - Application-level error handling

pub mod clients;
pub mod error;
pub mod ports;

pub use clients::{ApiClient, HttpBinClient, JsonPlaceholderClient};
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{HttpClient, HttpClientError, ReportSink};
