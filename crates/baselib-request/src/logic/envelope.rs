use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};

/// Fail with [`Error::HttpStatus`] unless `status` is in the 2xx range.
pub fn check_status(status: u16) -> Result<()> {
    if (200..=299).contains(&status) {
        Ok(())
    } else {
        Err(Error::HttpStatus { code: status })
    }
}

/// Parse a response body as JSON.
pub fn parse_body(bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice(bytes).map_err(Error::decode)
}

/// Apply the `{retcode, retmsg, data}` contract to a parsed body.
///
/// A `retcode` of exactly `0` yields `data` (or `null` when absent). Anything
/// else, a missing `retcode` included, becomes [`Error::Application`]
/// carrying the whole body. The body's own `retmsg` wins over the default
/// `未知错误[<retcode>]` message.
///
/// # Examples
///
/// ```
/// use baselib_request::unwrap_envelope;
/// use serde_json::json;
///
/// let data = unwrap_envelope(json!({"retcode": 0, "retmsg": "ok", "data": [1, 2]})).unwrap();
/// assert_eq!(data, json!([1, 2]));
///
/// let err = unwrap_envelope(json!({"retcode": 9})).unwrap_err();
/// assert_eq!(err.retmsg(), "未知错误[9]");
/// ```
pub fn unwrap_envelope(mut body: Value) -> Result<Value> {
    let retcode = body.get("retcode");
    if retcode.and_then(Value::as_f64) == Some(0.0) {
        return Ok(body.get_mut("data").map(Value::take).unwrap_or(Value::Null));
    }

    let code = retcode.and_then(Value::as_i64);
    let message = match body.get("retmsg") {
        Some(Value::String(retmsg)) => retmsg.clone(),
        None | Some(Value::Null) => default_message(retcode),
        Some(other) => other.to_string(),
    };

    Err(Error::Application {
        code,
        message,
        payload: body,
    })
}

/// Deserialize an already-validated payload into the caller's type.
pub fn decode_payload<T: DeserializeOwned>(payload: Value) -> Result<T> {
    serde_json::from_value(payload).map_err(Error::decode)
}

fn default_message(retcode: Option<&Value>) -> String {
    let rendered = match retcode {
        None => "undefined".to_owned(),
        Some(Value::String(code)) => code.clone(),
        Some(code) => code.to_string(),
    };
    format!("未知错误[{rendered}]")
}
