//! HTTP helpers for services that answer with a `{retcode, retmsg, data}`
//! envelope, plus a streaming text reader with per-URL cancellation.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - `data` - Immutable request, config and envelope types
//! - `logic` - Pure transformations (status and envelope checks, error
//!   reasons, header merging, incremental UTF-8 decoding)
//! - `effects` - I/O behind the [`HttpClient`] trait, driven by [`Client`]
//!
//! # Key Features
//!
//! - **Uniform contract**: every request helper checks the HTTP status, parses
//!   JSON and (optionally) the envelope's `retcode` before handing back data
//! - **Closed errors**: all failures are an [`Error`] whose `Display` is the
//!   human-readable `retmsg`
//! - **Streaming text**: [`Client::response_chunked`] publishes the text read so
//!   far to a `tokio::sync::watch` channel after every chunk
//! - **Owned cancellation**: abort handles live in the [`Client`], not in
//!   global state

mod data;
mod effects;
mod error;
mod logic;

pub use data::{Envelope, HttpRequest, Method, RequestConfig};
pub use effects::{BoxStream, CancelRegistry, Client, HttpClient, HttpResponse};
pub use logic::{
    Utf8Decoder, check_status, decode_payload, error_reason, merge_headers, parse_body,
    unwrap_envelope,
};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestClient;

pub use error::{Error, ErrorValue, Result, TransportError, TransportErrorKind};
