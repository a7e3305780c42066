//! Pure transformations for request handling.
//!
//! Nothing in here performs I/O: these functions turn transport failures,
//! status codes, raw bodies and byte chunks into the values the effectful
//! layer hands back to callers.

mod decode;
mod envelope;
mod headers;
mod reason;

pub use decode::Utf8Decoder;
pub use envelope::{check_status, decode_payload, parse_body, unwrap_envelope};
pub use headers::merge_headers;
pub use reason::error_reason;
