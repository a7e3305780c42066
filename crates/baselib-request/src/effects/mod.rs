//! I/O operations for request helpers.
//!
//! The transport boundary, the per-URL cancellation registry and the
//! [`Client`] that drives requests through both live here. Everything that
//! awaits or touches shared state is in this module.

mod cancel;
mod client;
mod http;

pub use cancel::CancelRegistry;
pub use client::Client;
pub use http::{BoxStream, HttpClient, HttpResponse};
#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
