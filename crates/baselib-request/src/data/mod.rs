//! Immutable data types for request helpers.
//!
//! Per-call configuration, the outgoing request descriptor and the response
//! envelope shape. These are plain values built per call and never retained.

pub mod config;
pub mod envelope;
pub mod request;

pub use config::RequestConfig;
pub use envelope::Envelope;
pub use request::{HttpRequest, Method};
