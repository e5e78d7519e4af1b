//! HTTP Response domain types

mod spec;

pub use spec::{ResponseSpec, truncate_chars};
