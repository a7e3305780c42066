use crate::error::{TransportError, TransportErrorKind};

/// Map a transport failure to a human-readable reason.
///
/// The classification is best effort: which failures end up as
/// [`TransportErrorKind::Connect`] or [`TransportErrorKind::Dns`] depends on
/// what the transport is able to tell apart.
///
/// # Examples
///
/// ```
/// use baselib_request::{error_reason, TransportError, TransportErrorKind};
///
/// let err = TransportError::new(TransportErrorKind::Network, "connection reset");
/// assert_eq!(error_reason(&err), "network error: connection reset");
/// ```
pub fn error_reason(error: &TransportError) -> String {
    match error.kind() {
        TransportErrorKind::Connect => {
            "network connection failed (server not running or URL incorrect)".to_owned()
        }
        TransportErrorKind::Dns => "DNS resolution failed".to_owned(),
        TransportErrorKind::Network => format!("network error: {}", error.message()),
        _ if error.message().starts_with("HTTP error") => error.message().to_owned(),
        _ => format!("unknown error: {}", error.message()),
    }
}
