use std::fmt;
use std::future::Future;
use std::pin::Pin;

use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt};

use crate::data::HttpRequest;
use crate::error::TransportError;

/// A boxed stream type for HTTP response bodies.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// Status and body of a transport response.
///
/// The body is a lazy, finite, non-restartable sequence of byte chunks.
pub struct HttpResponse {
    status: u16,
    body: BoxStream<'static, Result<Bytes, TransportError>>,
}

impl HttpResponse {
    pub fn new(status: u16, body: BoxStream<'static, Result<Bytes, TransportError>>) -> Self {
        Self { status, body }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn into_body(self) -> BoxStream<'static, Result<Bytes, TransportError>> {
        self.body
    }

    /// Drain the body into a single buffer.
    pub async fn bytes(self) -> Result<Bytes, TransportError> {
        let mut body = self.body;
        let mut buf = BytesMut::new();
        while let Some(chunk) = body.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("body", &"{ ... }")
            .finish()
    }
}

/// Asynchronous HTTP transport.
///
/// This is the only place the crate touches the network. Implementations
/// classify their failures into a [`TransportError`] so the reason resolver
/// can turn them into messages.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - Mock implementations for testing
pub trait HttpClient: Send + Sync {
    /// Send a request and return its status and streaming body.
    ///
    /// Non-2xx statuses are not errors at this layer.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use crate::data::Method;
    use crate::error::{Error, Result, TransportErrorKind};

    /// Production HTTP client implementation using reqwest.
    #[derive(Debug, Clone)]
    pub struct ReqwestClient {
        client: reqwest::Client,
    }

    impl ReqwestClient {
        /// Create a new ReqwestClient with default configuration.
        pub fn new() -> Result<Self> {
            let client = reqwest::Client::builder()
                .build()
                .map_err(|e| Error::transport(&classify(&e)))?;
            Ok(Self { client })
        }

        /// Wrap an already configured `reqwest::Client`.
        pub fn from_client(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    impl HttpClient for ReqwestClient {
        async fn send(
            &self,
            request: HttpRequest,
        ) -> std::result::Result<HttpResponse, TransportError> {
            let mut builder = match request.method {
                Method::Get => self.client.get(&request.url),
                Method::Post => self.client.post(&request.url),
            };

            for (key, value) in &request.headers {
                builder = builder.header(key, value);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await.map_err(|e| classify(&e))?;
            let status = response.status().as_u16();
            let body = response
                .bytes_stream()
                .map(|chunk| chunk.map_err(|e| classify(&e)));

            Ok(HttpResponse::new(status, Box::pin(body)))
        }
    }

    fn classify(err: &reqwest::Error) -> TransportError {
        let message = error_chain(err);
        let kind = if err.is_connect() {
            if is_dns_failure(&message) {
                TransportErrorKind::Dns
            } else {
                TransportErrorKind::Connect
            }
        } else if err.is_timeout() || err.is_request() || err.is_body() {
            TransportErrorKind::Network
        } else {
            TransportErrorKind::Other
        };
        TransportError::new(kind, message)
    }

    fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }

    // Resolver failures surface as connect errors with hyper-util's "dns error"
    // or the OS lookup message somewhere in the source chain.
    fn is_dns_failure(message: &str) -> bool {
        let message = message.to_ascii_lowercase();
        ["dns error", "failed to lookup address", "name or service not known"]
            .iter()
            .any(|needle| message.contains(needle))
    }

}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;
