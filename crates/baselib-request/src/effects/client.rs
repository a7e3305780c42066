use futures_util::StreamExt;
use futures_util::future::{Abortable, Aborted};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, trace, warn};

use crate::data::{HttpRequest, Method, RequestConfig};
use crate::effects::cancel::CancelRegistry;
use crate::effects::http::HttpClient;
use crate::error::{Error, Result, TransportError};
use crate::logic::{self, Utf8Decoder};

const CONTENT_TYPE: &str = "Content-Type";
const APPLICATION_JSON: &str = "application/json";

/// Issues envelope-checked requests and chunked reads over an [`HttpClient`].
///
/// The client owns the cancellation registry used by
/// [`response_chunked`](Client::response_chunked), so sharing one `Client`
/// (for example behind an `Arc`) shares cancellation between callers.
///
/// # Examples
///
/// ```no_run
/// # #[cfg(feature = "reqwest")]
/// # async fn demo() -> baselib_request::Result<()> {
/// use baselib_request::{Client, ReqwestClient, RequestConfig};
///
/// let client = Client::new(ReqwestClient::new()?);
/// let user: serde_json::Value = client
///     .get("https://example.com/api/user", &RequestConfig::default())
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client<C: HttpClient> {
    transport: C,
    defaults: RequestConfig,
    registry: CancelRegistry,
}

impl<C: HttpClient> Client<C> {
    pub fn new(transport: C) -> Self {
        Self {
            transport,
            defaults: RequestConfig::default(),
            registry: CancelRegistry::new(),
        }
    }

    /// Set headers sent with every request.
    ///
    /// Per-call configuration still overrides them.
    #[must_use]
    pub fn with_defaults(mut self, defaults: RequestConfig) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn transport(&self) -> &C {
        &self.transport
    }

    /// GET `url` and return the envelope's `data`.
    pub async fn get<T: DeserializeOwned>(&self, url: &str, config: &RequestConfig) -> Result<T> {
        let request = self.build_get(url, config);
        let data = self.request(request, true).await?;
        logic::decode_payload(data)
    }

    /// GET `url` and return the whole JSON body, without envelope checks.
    ///
    /// For plain configuration documents that don't carry a `retcode`.
    pub async fn get_conf<T: DeserializeOwned>(
        &self,
        url: &str,
        config: &RequestConfig,
    ) -> Result<T> {
        let request = self.build_get(url, config);
        let body = self.request(request, false).await?;
        logic::decode_payload(body)
    }

    /// POST `params` as JSON to `url` and return the envelope's `data`.
    pub async fn post<T, P>(&self, url: &str, params: &P, config: &RequestConfig) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let request = self.build_post(url, params, config)?;
        let data = self.request(request, true).await?;
        logic::decode_payload(data)
    }

    /// POST `params` to `url` and read the body as streamed text.
    ///
    /// After every chunk the text accumulated so far is held in `output`,
    /// so observers see partial results before the stream ends. The full text
    /// is returned on completion.
    ///
    /// The call registers an abort handle under `url`. With `cancel_previous`
    /// set, a request still registered under the same URL is aborted first;
    /// otherwise it keeps running on its own. An aborted call fails with an
    /// [`Error::Transport`] for which [`Error::is_aborted`] holds.
    pub async fn response_chunked<P>(
        &self,
        output: &watch::Sender<String>,
        url: &str,
        params: &P,
        cancel_previous: bool,
        config: &RequestConfig,
    ) -> Result<String>
    where
        P: Serialize + ?Sized,
    {
        let registration = self.registry.register(url, cancel_previous);

        let result = match self.build_post(url, params, config) {
            Ok(request) => {
                match Abortable::new(self.read_chunked(output, request), registration).await {
                    Ok(result) => result,
                    Err(Aborted) => Err(Error::transport(&TransportError::aborted())),
                }
            }
            Err(e) => Err(e),
        };

        if let Err(ref e) = result {
            warn!(url, retmsg = %e, "chunked request failed");
        }
        result
    }

    /// Abort the chunked request last registered for `url`.
    ///
    /// Returns whether there was one to signal. Unknown URLs are a no-op.
    pub fn abort_last_req(&self, url: &str) -> bool {
        self.registry.abort(url)
    }

    async fn request(&self, request: HttpRequest, check_code: bool) -> Result<Value> {
        let url = request.url.clone();
        debug!(method = %request.method, url = %url, "sending request");

        let result = self.exchange(request, check_code).await;
        if let Err(ref e) = result {
            warn!(url = %url, retmsg = %e, "request failed");
        }
        result
    }

    async fn exchange(&self, request: HttpRequest, check_code: bool) -> Result<Value> {
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| Error::transport(&e))?;
        logic::check_status(response.status())?;

        // a body that stops midway fails like an unparsable one
        let bytes = response.bytes().await.map_err(|e| Error::Decode {
            message: e.message().to_owned(),
        })?;
        let body = logic::parse_body(&bytes)?;

        if check_code {
            logic::unwrap_envelope(body)
        } else {
            Ok(body)
        }
    }

    async fn read_chunked(
        &self,
        output: &watch::Sender<String>,
        request: HttpRequest,
    ) -> Result<String> {
        debug!(url = %request.url, "sending chunked request");
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| Error::transport(&e))?;
        logic::check_status(response.status())?;

        let mut body = response.into_body();
        let mut decoder = Utf8Decoder::new();
        let mut started = false;

        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| Error::transport(&e))?;
            let piece = decoder.decode(&chunk);
            publish(output, &piece, &mut started);
            trace!(bytes = chunk.len(), total = output.borrow().len(), "chunk received");
        }

        let tail = decoder.finish();
        if !tail.is_empty() {
            publish(output, &tail, &mut started);
        }

        if started {
            Ok(output.borrow().clone())
        } else {
            Ok(String::new())
        }
    }

    fn build_get(&self, url: &str, config: &RequestConfig) -> HttpRequest {
        let headers = logic::merge_headers(&[&self.defaults.headers[..], &config.headers[..]]);
        HttpRequest::new(Method::Get, url).with_headers(headers)
    }

    fn build_post<P>(&self, url: &str, params: &P, config: &RequestConfig) -> Result<HttpRequest>
    where
        P: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(params).map_err(|e| Error::Encode {
            message: e.to_string(),
        })?;
        let json = [(CONTENT_TYPE.to_owned(), APPLICATION_JSON.to_owned())];
        let headers = logic::merge_headers(&[
            &json[..],
            &self.defaults.headers[..],
            &config.headers[..],
        ]);

        Ok(HttpRequest::new(Method::Post, url)
            .with_headers(headers)
            .with_body(body))
    }
}

/// Append `piece` to the text held by `output`.
///
/// The first piece of a call replaces whatever the slot held before.
fn publish(output: &watch::Sender<String>, piece: &str, started: &mut bool) {
    if *started {
        output.send_modify(|text| text.push_str(piece));
    } else {
        output.send_modify(|text| {
            text.clear();
            text.push_str(piece);
        });
        *started = true;
    }
}
