//! Error types for baselib-request.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Coarse classification of a failure raised by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    /// The server could not be reached at all.
    Connect,
    /// The host name could not be resolved.
    Dns,
    /// Any other failure inside the network layer (reset, body read, timeout).
    Network,
    /// The request was cancelled through its abort handle.
    Aborted,
    /// Anything the transport could not classify.
    Other,
}

/// A failure reported by an [`HttpClient`](crate::HttpClient) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    kind: TransportErrorKind,
    message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The failure produced when an in-flight request is aborted.
    pub fn aborted() -> Self {
        Self::new(TransportErrorKind::Aborted, "request aborted")
    }

    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Every way a request helper can fail.
///
/// The `Display` output of each variant is the human-readable `retmsg`.
#[derive(Debug, Error)]
pub enum Error {
    /// The transport failed before a usable response arrived.
    #[error("{reason}")]
    Transport {
        kind: TransportErrorKind,
        reason: String,
    },

    /// The server answered with a status outside `200..=299`.
    #[error("{code}错误")]
    HttpStatus { code: u16 },

    /// The body (or the envelope payload) could not be decoded.
    #[error("{message}")]
    Decode { message: String },

    /// Request parameters could not be serialized to JSON.
    #[error("{message}")]
    Encode { message: String },

    /// The envelope carried a `retcode` other than `0`.
    ///
    /// `payload` holds the whole parsed body.
    #[error("{message}")]
    Application {
        code: Option<i64>,
        message: String,
        payload: Value,
    },
}

impl Error {
    /// Normalize a transport failure through the reason resolver.
    pub fn transport(error: &TransportError) -> Self {
        Error::Transport {
            kind: error.kind(),
            reason: crate::logic::error_reason(error),
        }
    }

    pub fn decode(error: impl std::fmt::Display) -> Self {
        Error::Decode {
            message: error.to_string(),
        }
    }

    pub fn retmsg(&self) -> String {
        self.to_string()
    }

    pub fn retcode(&self) -> Option<i64> {
        match self {
            Error::Application { code, .. } => *code,
            _ => None,
        }
    }

    /// The `data` field of a failed envelope, if it had one.
    pub fn data(&self) -> Option<&Value> {
        match self {
            Error::Application { payload, .. } => payload.get("data"),
            _ => None,
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(
            self,
            Error::Transport {
                kind: TransportErrorKind::Aborted,
                ..
            }
        )
    }

    pub fn to_value(&self) -> ErrorValue {
        ErrorValue {
            retmsg: self.retmsg(),
            retcode: self.retcode(),
            data: self.data().cloned(),
        }
    }
}

impl From<&Error> for ErrorValue {
    fn from(error: &Error) -> Self {
        error.to_value()
    }
}

/// Plain `{ retmsg, retcode?, data? }` view of an [`Error`], for handing to
/// callers that expect the envelope's failure shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorValue {
    pub retmsg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retcode: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

pub type Result<T> = std::result::Result<T, Error>;
