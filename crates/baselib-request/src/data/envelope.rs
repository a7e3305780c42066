use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `{retcode, retmsg, data}` response shape used by backing services.
///
/// `retcode == 0` signals success. The helpers in this crate read the
/// envelope from untyped JSON; this type is for code that produces or
/// inspects envelopes directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    pub retcode: i64,
    #[serde(default)]
    pub retmsg: String,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            retcode: 0,
            retmsg: "ok".to_owned(),
            data,
        }
    }

    pub fn is_success(&self) -> bool {
        self.retcode == 0
    }
}
