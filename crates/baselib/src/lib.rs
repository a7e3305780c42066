//! Request helpers for envelope-speaking services.
//!
//! This crate re-exports the request layer from `baselib-request` and adds
//! [`to`], which turns any fallible future into an `(error, value)` pair.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "reqwest")]
//! # async fn demo() -> baselib::Result<()> {
//! use baselib::{Client, ReqwestClient, RequestConfig, to};
//!
//! let client = Client::new(ReqwestClient::new()?);
//! let (err, conf) = to(client.get_conf::<serde_json::Value>(
//!     "https://example.com/conf.json",
//!     &RequestConfig::default(),
//! ))
//! .await;
//! if let Some(err) = err {
//!     eprintln!("failed to load config: {}", err.retmsg());
//! }
//! # let _ = conf;
//! # Ok(())
//! # }
//! ```

mod to;

pub use baselib_request::{
    BoxStream, CancelRegistry, Client, Envelope, Error, ErrorValue, HttpClient, HttpRequest,
    HttpResponse, Method, RequestConfig, Result, TransportError, TransportErrorKind, Utf8Decoder,
    error_reason,
};
pub use to::{Settled, to};

#[cfg(feature = "reqwest")]
pub use baselib_request::ReqwestClient;
